// Text and category matching for the catalog browse view
use crate::models::{Category, Filter, Repository, Section};

/// Case-insensitive substring match across the searchable fields.
///
/// An empty query matches everything. The rule is deliberately simple and
/// stable, the same inputs always give the same answer, which is what lets
/// the query engine memoize on top of it.
pub fn matches_search(repo: &Repository, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let mut haystack = String::new();
    haystack.push_str(&repo.name);
    haystack.push(' ');
    haystack.push_str(&repo.full_name);
    if let Some(description) = &repo.description {
        haystack.push(' ');
        haystack.push_str(description);
    }
    if let Some(domain) = &repo.domain {
        haystack.push(' ');
        haystack.push_str(domain);
    }

    haystack.to_lowercase().contains(&query)
}

/// Is this repository eligible for the given browsing section?
///
/// Eligible means: not yet installed, in a category the section shows, and
/// in a category that is enabled system-wide.
pub fn in_active_section(
    repo: &Repository,
    section: &Section,
    enabled_categories: &[Category],
) -> bool {
    !repo.installed
        && section.categories.contains(&repo.category)
        && enabled_categories.contains(&repo.category)
}

/// Does the repository's category survive the checked filter toggles?
///
/// An empty filter list means no restriction. A single-entry list is still
/// applied even though the host would not render a control for it.
pub fn passes_checked_filters(repo: &Repository, filters: &[Filter]) -> bool {
    filters.is_empty()
        || filters
            .iter()
            .any(|filter| filter.id == repo.category && filter.checked)
}

/// Build the initial filter list for a section: one checked entry per
/// section category that is also enabled system-wide. Ids are unique by
/// construction since section category lists do not repeat.
pub fn filters_for_section(section: &Section, enabled_categories: &[Category]) -> Vec<Filter> {
    section
        .categories
        .iter()
        .filter(|category| enabled_categories.contains(category))
        .map(|category| Filter {
            id: *category,
            value: category.label().to_string(),
            checked: true,
        })
        .collect()
}

/// Flip the checked bit of the filter with the given id, if present.
pub fn toggle_filter(filters: &mut [Filter], id: Category) {
    if let Some(filter) = filters.iter_mut().find(|filter| filter.id == id) {
        filter.checked = !filter.checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RepositoryStatus, VersionMode};
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, category: Category, installed: bool) -> Repository {
        Repository {
            id: name.to_string(),
            name: name.to_string(),
            description: Some(format!("{name} does things")),
            category,
            full_name: format!("author/{name}"),
            installed,
            installed_version: None,
            available_version: Some("1.0.0".into()),
            stars: 0,
            last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            domain: None,
            version_mode: VersionMode::Version,
            can_download: true,
            status: if installed {
                RepositoryStatus::Installed
            } else {
                RepositoryStatus::New
            },
        }
    }

    fn section() -> Section {
        Section {
            id: "frontend".into(),
            categories: vec![Category::Plugin, Category::Theme],
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let r = repo("anything", Category::Plugin, false);
        assert!(matches_search(&r, ""));
        assert!(matches_search(&r, "   "));
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let mut r = repo("Mushroom", Category::Plugin, false);
        r.domain = Some("mushroom".into());
        assert!(matches_search(&r, "MUSH"));
        assert!(matches_search(&r, "author/mush"));
        assert!(matches_search(&r, "does things"));
        assert!(!matches_search(&r, "bubble"));
    }

    #[test]
    fn test_installed_repositories_are_not_section_eligible() {
        let enabled = [Category::Plugin, Category::Theme];
        assert!(in_active_section(
            &repo("card", Category::Plugin, false),
            &section(),
            &enabled
        ));
        assert!(!in_active_section(
            &repo("card", Category::Plugin, true),
            &section(),
            &enabled
        ));
    }

    #[test]
    fn test_section_and_enabled_categories_both_gate() {
        let s = section();
        // integration is not in the frontend section
        assert!(!in_active_section(
            &repo("sensor", Category::Integration, false),
            &s,
            &[Category::Integration]
        ));
        // theme is in the section but disabled system-wide
        assert!(!in_active_section(
            &repo("noir", Category::Theme, false),
            &s,
            &[Category::Plugin]
        ));
    }

    #[test]
    fn test_empty_filter_list_restricts_nothing() {
        let r = repo("card", Category::Plugin, false);
        assert!(passes_checked_filters(&r, &[]));
    }

    #[test]
    fn test_single_unchecked_filter_still_applies() {
        let r = repo("card", Category::Plugin, false);
        let filters = vec![Filter {
            id: Category::Plugin,
            value: "Dashboard".into(),
            checked: false,
        }];
        assert!(!passes_checked_filters(&r, &filters));
    }

    #[test]
    fn test_filters_for_section_intersects_enabled_categories() {
        let filters = filters_for_section(&section(), &[Category::Plugin, Category::Integration]);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].id, Category::Plugin);
        assert!(filters[0].checked);
    }

    #[test]
    fn test_toggle_filter_flips_checked() {
        let mut filters = filters_for_section(&section(), &[Category::Plugin, Category::Theme]);
        toggle_filter(&mut filters, Category::Theme);
        assert!(filters.iter().find(|f| f.id == Category::Plugin).unwrap().checked);
        assert!(!filters.iter().find(|f| f.id == Category::Theme).unwrap().checked);
        toggle_filter(&mut filters, Category::Theme);
        assert!(filters.iter().find(|f| f.id == Category::Theme).unwrap().checked);
    }
}
