// Notification derivation: priority-ordered rules over the system state
use crate::memo::MemoSlot;
use crate::models::{
    Message, MessageKind, Repository, RepositoryStatus, Severity, StartupStage, SystemState,
};
use tracing::debug;

/// Navigation target offered by the restart notice when the host supports
/// quick redirects.
pub const RESTART_PATH: &str = "/_my_redirect/server_controls";

/// Answers whether a repository's resource has been registered with the
/// front-end resource system. The host owns that system; the pipeline only
/// asks.
#[cfg_attr(test, mockall::automock)]
pub trait ResourceRegistry {
    fn is_registered(&self, state: &SystemState, repository: &Repository) -> bool;
}

/// Derives the ordered message list for the entry view.
///
/// A single-slot cache keyed on (state, has_quick_redirect) makes repeated
/// aggregation over unchanged state free - a hit returns the previous list
/// without consulting the registry or re-running any rule.
#[derive(Debug, Default)]
pub struct MessageEngine {
    result: MemoSlot<(SystemState, bool), Vec<Message>>,
}

impl MessageEngine {
    pub fn new() -> Self {
        Self {
            result: MemoSlot::new(),
        }
    }

    pub fn aggregate(
        &mut self,
        state: &SystemState,
        registry: &dyn ResourceRegistry,
        has_quick_redirect: bool,
    ) -> Vec<Message> {
        self.result
            .get_or_compute((state.clone(), has_quick_redirect), |(state, quick)| {
                build_messages(state, registry, *quick)
            })
    }
}

/// Run every rule once, in priority order.
///
/// Rule order is a business contract: removed-package advisories first (one
/// per affected repository, in repository iteration order), then the startup
/// notice, then the disabled override - which replaces the entire list, it
/// never appends - then the unregistered-resource and pending-restart
/// counts.
pub fn build_messages(
    state: &SystemState,
    registry: &dyn ResourceRegistry,
    has_quick_redirect: bool,
) -> Vec<Message> {
    let mut messages = Vec::new();
    let mut restart_pending = 0usize;
    let mut unregistered = 0usize;

    for repo in &state.repositories {
        if repo.status == RepositoryStatus::PendingRestart {
            restart_pending += 1;
        }
        if !repo.installed {
            continue;
        }
        if !registry.is_registered(state, repo) {
            unregistered += 1;
        }
        if let Some(removed) = state
            .removed
            .iter()
            .find(|entry| entry.repository == repo.full_name)
        {
            messages.push(Message {
                kind: MessageKind::RemovedRepository,
                name: format!("{} has been removed from the store", removed.repository),
                secondary: None,
                info: Some(removed.reason.clone()),
                severity: Severity::Warning,
                repository: Some(repo.full_name.clone()),
                dialog: Some("remove".to_string()),
                path: None,
            });
        }
    }

    if state.startup {
        if let Some(message) = startup_message(state.stage) {
            messages.push(message);
        }
    }

    if let Some(reason) = state.disabled_reason.as_deref().filter(|r| !r.is_empty()) {
        debug!(reason, "store disabled, suppressing all other messages");
        return vec![Message {
            kind: MessageKind::Disabled,
            name: "The store is disabled".to_string(),
            secondary: Some(reason.to_string()),
            info: Some(
                "No repository actions are possible until the issue has been resolved"
                    .to_string(),
            ),
            severity: Severity::Error,
            repository: None,
            dialog: None,
            path: None,
        }];
    }

    if unregistered > 0 {
        messages.push(Message {
            kind: MessageKind::MissingResources,
            name: "Resources are not registered".to_string(),
            secondary: None,
            info: Some(format!(
                "{unregistered} downloaded repositories are not registered with the resource system"
            )),
            severity: Severity::Error,
            repository: None,
            dialog: None,
            path: None,
        });
    }

    if restart_pending > 0 {
        let wording = if restart_pending == 1 {
            "integration"
        } else {
            "integrations"
        };
        messages.push(Message {
            kind: MessageKind::PendingRestart,
            name: "Restart required".to_string(),
            secondary: None,
            info: Some(format!(
                "You need to restart to finish setting up {restart_pending} {wording}"
            )),
            severity: Severity::Error,
            repository: None,
            dialog: None,
            path: has_quick_redirect.then(|| RESTART_PATH.to_string()),
        });
    }

    messages
}

fn startup_message(stage: StartupStage) -> Option<Message> {
    let (name, info) = match stage {
        StartupStage::Setup => (
            "Initial setup in progress",
            "The store is being set up, this can take a few minutes",
        ),
        StartupStage::Waiting => (
            "Waiting for the system to finish starting",
            "Repository tasks are held back until startup has completed",
        ),
        StartupStage::Startup => (
            "Startup tasks running",
            "Information may be incomplete until the startup tasks have finished",
        ),
        StartupStage::Running => return None,
    };
    Some(Message {
        kind: MessageKind::Startup,
        name: name.to_string(),
        secondary: None,
        info: Some(info.to_string()),
        severity: Severity::Warning,
        repository: None,
        dialog: None,
        path: None,
    })
}
