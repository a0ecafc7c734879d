use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository model - the star of the show
///
/// A read-only snapshot of one installable package as delivered by the
/// backend. The derivation pipeline never mutates these; it only reads them
/// and hands back freshly built lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// Opaque backend identity
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    /// Full external reference, "owner/name"
    pub full_name: String,
    pub installed: bool,
    pub installed_version: Option<String>,
    pub available_version: Option<String>,
    /// Popularity metric used for the default sort
    pub stars: u32,
    pub last_updated: DateTime<Utc>,
    /// Domain used for icon resolution, integrations only
    pub domain: Option<String>,
    pub version_mode: VersionMode,
    pub can_download: bool,
    /// Invariant: `PendingRestart` implies `installed`
    pub status: RepositoryStatus,
}

impl Repository {
    /// True when a newer downloadable version is waiting to be installed.
    pub fn pending_update(&self) -> bool {
        self.installed
            && self.can_download
            && self.available_version.is_some()
            && self.installed_version != self.available_version
    }

    /// URL showing what changed between the downloaded and available version.
    ///
    /// Commit-tracked repositories get a compare URL, release-tracked ones
    /// the releases page.
    pub fn changelog_url(&self) -> String {
        match self.version_mode {
            VersionMode::Commit => match (&self.installed_version, &self.available_version) {
                (Some(installed), Some(available)) => format!(
                    "https://github.com/{}/compare/{}...{}",
                    self.full_name, installed, available
                ),
                _ => format!("https://github.com/{}", self.full_name),
            },
            VersionMode::Version => format!("https://github.com/{}/releases", self.full_name),
        }
    }
}

/// Which kind of package a repository delivers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Integration,
    Plugin,
    Theme,
    Appdaemon,
    Netdaemon,
    PythonScript,
    Template,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Integration => "Integration",
            Category::Plugin => "Dashboard",
            Category::Theme => "Theme",
            Category::Appdaemon => "AppDaemon app",
            Category::Netdaemon => "NetDaemon app",
            Category::PythonScript => "Python script",
            Category::Template => "Template",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How a repository tracks its upstream
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VersionMode {
    Version,
    Commit,
}

/// Lifecycle status as reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RepositoryStatus {
    New,
    Installed,
    PendingRestart,
    PendingUpgrade,
}

/// How we want catalog results sorted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Popularity, descending - the default the browse view opens with
    #[default]
    Stars,
    /// Most recently updated first
    LastUpdated,
    /// Display name, ascending, case-insensitive
    Name,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::LastUpdated => "last_updated",
            SortKey::Name => "name",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortKey {
    type Err = crate::Error;

    // Unknown keys are a contract violation, not a default
    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "stars" => Ok(SortKey::Stars),
            "last_updated" => Ok(SortKey::LastUpdated),
            "name" => Ok(SortKey::Name),
            other => Err(crate::Error::InvalidSortKey(other.to_string())),
        }
    }
}

/// A user-toggleable category inclusion control
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Filter {
    pub id: Category,
    pub value: String,
    pub checked: bool,
}

/// A named browsing context and the categories it may show
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub id: String,
    pub categories: Vec<Category>,
}

/// Advisory entry for a repository that was removed from the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemovedRepository {
    /// Full reference, "owner/name"
    pub repository: String,
    pub reason: String,
}

/// Where the system is in its startup sequence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StartupStage {
    Setup,
    Waiting,
    Startup,
    Running,
}

/// How loudly a message should be surfaced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Which notification rule produced a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    RemovedRepository,
    Startup,
    Disabled,
    MissingResources,
    PendingRestart,
}

/// A derived, prioritized notification surfaced to the user
///
/// Built fresh on every aggregation pass and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub kind: MessageKind,
    pub name: String,
    pub secondary: Option<String>,
    pub info: Option<String>,
    pub severity: Severity,
    /// Full reference of the repository the message is about, if any
    pub repository: Option<String>,
    /// Dialog to open when the message is interacted with
    pub dialog: Option<String>,
    /// Navigation path to offer, if any
    pub path: Option<String>,
}

/// Everything one aggregation pass reads, as an immutable snapshot
///
/// The resource-registration predicate lives on the `ResourceRegistry`
/// collaborator trait, not here, so the state stays plain data and can act
/// as a memoization key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemState {
    pub repositories: Vec<Repository>,
    pub removed: Vec<RemovedRepository>,
    pub startup: bool,
    pub stage: StartupStage,
    pub disabled_reason: Option<String>,
    /// Categories enabled system-wide
    pub categories: Vec<Category>,
    /// Latest transport-delivered error, passed through untouched for display
    pub current_error: Option<String>,
}
