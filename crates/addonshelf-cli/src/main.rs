use addonshelf_core::messages::ResourceRegistry;
use addonshelf_core::models::{Category, Repository, Section, Severity, SortKey, SystemState};
use addonshelf_core::search::filters_for_section;
use addonshelf_core::{CatalogEngine, MessageEngine};
use anyhow::Context;
use clap::Parser;
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "addonshelf")]
#[command(version, about = "Package catalog shaping and notification derivation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Filter, sort, and window the catalog from a state snapshot
    Query {
        /// Path to a JSON system-state snapshot
        state: PathBuf,
        /// Browsing section (integrations, frontend, automation)
        #[arg(long, default_value = "integrations")]
        section: String,
        /// Free-text search
        #[arg(long, default_value = "")]
        search: String,
        /// Sort key: stars, last_updated, or name
        #[arg(long, default_value = "stars")]
        sort: String,
        /// How many rows to materialize
        #[arg(long, default_value_t = 30)]
        load: usize,
    },
    /// Derive the prioritized notification list from a state snapshot
    Messages {
        /// Path to a JSON system-state snapshot
        state: PathBuf,
        /// Offer the quick-redirect restart path
        #[arg(long)]
        quick_redirect: bool,
        /// Full names of repositories whose resources are not registered
        #[arg(long)]
        unregistered: Vec<String>,
    },
}

/// The section -> categories lookup this host exposes to the core
fn sections() -> Vec<Section> {
    vec![
        Section {
            id: "integrations".into(),
            categories: vec![Category::Integration],
        },
        Section {
            id: "frontend".into(),
            categories: vec![Category::Plugin, Category::Theme],
        },
        Section {
            id: "automation".into(),
            categories: vec![
                Category::PythonScript,
                Category::Appdaemon,
                Category::Netdaemon,
                Category::Template,
            ],
        },
    ]
}

/// Registry backed by an explicit deny-list of full names
struct ListRegistry {
    unregistered: HashSet<String>,
}

impl ResourceRegistry for ListRegistry {
    fn is_registered(&self, _state: &SystemState, repository: &Repository) -> bool {
        !self.unregistered.contains(&repository.full_name)
    }
}

fn load_state(path: &PathBuf) -> anyhow::Result<SystemState> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state snapshot {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse state snapshot {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "addonshelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            state,
            section,
            search,
            sort,
            load,
        } => {
            let state = load_state(&state)?;
            let sections = sections();
            let section = sections
                .iter()
                .find(|s| s.id == section)
                .with_context(|| format!("Unknown section: {section}"))?;
            let sort_key = SortKey::from_str(&sort)?;
            let filters = filters_for_section(section, &state.categories);

            let mut engine = CatalogEngine::new();
            let rows = engine.query(
                &state.repositories,
                section,
                &state.categories,
                &filters,
                &search,
                sort_key,
                load,
            );

            tracing::info!("{} repositories matched", rows.len());
            for repo in &rows {
                println!(
                    "{:<40} {:<14} {:>6}  {}",
                    repo.full_name,
                    repo.category,
                    repo.stars,
                    repo.description.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Messages {
            state,
            quick_redirect,
            unregistered,
        } => {
            let state = load_state(&state)?;
            let registry = ListRegistry {
                unregistered: unregistered.into_iter().collect(),
            };

            let mut engine = MessageEngine::new();
            let messages = engine.aggregate(&state, &registry, quick_redirect);

            if messages.is_empty() {
                println!("No messages");
            }
            for message in &messages {
                let severity = match message.severity {
                    Severity::Warning => "warning",
                    Severity::Error => "error",
                };
                println!(
                    "[{severity}] {}: {}",
                    message.name,
                    message.info.as_deref().unwrap_or("")
                );
            }
            if let Some(error) = &state.current_error {
                println!("[error] {error}");
            }
        }
    }

    Ok(())
}
