// Catalog ordering
use crate::models::{Repository, SortKey};

/// Sort repositories in place by the selected key.
///
/// `slice::sort_by` is stable, so entries with equal keys keep their
/// relative input order across recomputations - the browse view must not
/// flicker rows around when nothing changed.
pub fn sort_repositories(repositories: &mut [Repository], key: SortKey) {
    match key {
        SortKey::Stars => repositories.sort_by(|a, b| b.stars.cmp(&a.stars)),
        SortKey::LastUpdated => {
            repositories.sort_by(|a, b| b.last_updated.cmp(&a.last_updated))
        }
        SortKey::Name => repositories
            .sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, RepositoryStatus, VersionMode};
    use chrono::{TimeZone, Utc};

    fn repo(name: &str, stars: u32, updated_day: u32) -> Repository {
        Repository {
            id: name.to_string(),
            name: name.to_string(),
            description: None,
            category: Category::Plugin,
            full_name: format!("author/{name}"),
            installed: false,
            installed_version: None,
            available_version: None,
            stars,
            last_updated: Utc.with_ymd_and_hms(2024, 1, updated_day, 0, 0, 0).unwrap(),
            domain: None,
            version_mode: VersionMode::Version,
            can_download: true,
            status: RepositoryStatus::New,
        }
    }

    fn names(repositories: &[Repository]) -> Vec<&str> {
        repositories.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_name_sorts_ascending_case_insensitive() {
        let mut repos = vec![repo("banana", 1, 1), repo("Apple", 2, 2), repo("cherry", 3, 3)];
        sort_repositories(&mut repos, SortKey::Name);
        assert_eq!(names(&repos), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_stars_sorts_descending() {
        let mut repos = vec![repo("low", 1, 1), repo("high", 50, 1), repo("mid", 10, 1)];
        sort_repositories(&mut repos, SortKey::Stars);
        assert_eq!(names(&repos), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_equal_stars_keep_input_order() {
        let mut repos = vec![repo("B", 5, 1), repo("A", 5, 1)];
        sort_repositories(&mut repos, SortKey::Stars);
        assert_eq!(names(&repos), vec!["B", "A"]);

        sort_repositories(&mut repos, SortKey::Name);
        assert_eq!(names(&repos), vec!["A", "B"]);
    }

    #[test]
    fn test_last_updated_sorts_most_recent_first() {
        let mut repos = vec![repo("old", 0, 1), repo("new", 0, 20), repo("mid", 0, 10)];
        sort_repositories(&mut repos, SortKey::LastUpdated);
        assert_eq!(names(&repos), vec!["new", "mid", "old"]);
    }
}
