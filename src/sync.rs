//! Reconciliation between local declarations and the monitors on phare.io

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, error, info};

use crate::diff;
use crate::monitor::{self, Monitor};
use crate::phare::PhareClient;

/// Parallelism of the bulk pause/resume paths. The per-monitor calls are
/// independent and unordered; they share nothing but the connection pool.
const BULK_CONCURRENCY: usize = 5;

/// Reconciles the monitors on phare.io with the local declaration file.
///
/// The declarations always win: declared monitors are created, updated, or
/// resumed as needed, and remote monitors with no declaration are paused.
/// Calls run one at a time; the first failure aborts the run.
pub async fn sync_monitors(client: &PhareClient, monitor_file: &Path) -> Result<()> {
    let remote = client.list_monitors().await?;
    let local = monitor::load_declarations(monitor_file)?;

    for (name, declared) in &local {
        match remote.get(name) {
            Some(existing) => {
                let id = existing
                    .id()
                    .with_context(|| format!("monitor {name} has no id"))?;

                // Resume before diffing so a just-reactivated monitor still
                // receives any pending field updates in the same pass.
                if existing.is_paused() {
                    client.resume_monitor(id).await?;
                    info!("Resumed monitor {name}");
                }

                let changes = diff::monitor_diff(declared, existing);
                if changes.is_empty() {
                    debug!("Monitor {name} up-to-date with phare.io");
                } else {
                    debug!("Monitor {name} differs: {changes:?}");
                    client.update_monitor(id, declared).await?;
                    info!("Updated monitor {name}");
                }
            }
            None => {
                client.create_monitor(declared).await?;
                info!("Created monitor {name}");
            }
        }
    }

    // Removal from the declaration file means "stop monitoring", not delete.
    for (name, existing) in &remote {
        if local.contains_key(name) {
            continue;
        }
        let id = existing
            .id()
            .with_context(|| format!("monitor {name} has no id"))?;
        client.pause_monitor(id).await?;
        info!("Paused monitor {name}");
    }

    Ok(())
}

/// Pauses every currently active monitor.
pub async fn pause_all_active(client: &PhareClient) -> Result<()> {
    bulk_toggle(client, BulkAction::Pause).await
}

/// Resumes every currently paused monitor.
pub async fn resume_all_paused(client: &PhareClient) -> Result<()> {
    bulk_toggle(client, BulkAction::Resume).await
}

#[derive(Clone, Copy)]
enum BulkAction {
    Pause,
    Resume,
}

impl BulkAction {
    fn wants(self, monitor: &Monitor) -> bool {
        match self {
            BulkAction::Pause => !monitor.is_paused(),
            BulkAction::Resume => monitor.is_paused(),
        }
    }

    fn verb(self) -> &'static str {
        match self {
            BulkAction::Pause => "pause",
            BulkAction::Resume => "resume",
        }
    }
}

/// Issues the toggle against every monitor in the opposite state, with
/// bounded fan-out. Outcomes are collected per monitor: one failed call does
/// not stop the others, but any failure makes the whole command fail after
/// every outcome has been reported.
async fn bulk_toggle(client: &PhareClient, action: BulkAction) -> Result<()> {
    let monitors = client.list_monitors().await?;
    let targets: Vec<(String, Monitor)> = monitors
        .into_iter()
        .filter(|(_, monitor)| action.wants(monitor))
        .collect();

    let outcomes: Vec<(String, Result<()>)> = stream::iter(targets)
        .map(|(name, monitor)| async move {
            let outcome = toggle_one(client, action, &monitor).await;
            (name, outcome)
        })
        .buffer_unordered(BULK_CONCURRENCY)
        .collect()
        .await;

    let mut failed = 0;
    for (name, outcome) in &outcomes {
        match outcome {
            Ok(()) => match action {
                BulkAction::Pause => info!("Paused monitor {name}"),
                BulkAction::Resume => info!("Resumed monitor {name}"),
            },
            Err(err) => {
                failed += 1;
                error!("Failed to {} monitor {name}: {err:#}", action.verb());
            }
        }
    }
    if failed > 0 {
        return Err(anyhow!(
            "failed to {} {failed} of {} monitors",
            action.verb(),
            outcomes.len()
        ));
    }
    Ok(())
}

async fn toggle_one(client: &PhareClient, action: BulkAction, monitor: &Monitor) -> Result<()> {
    let id = monitor.id().context("monitor has no id")?;
    match action {
        BulkAction::Pause => client.pause_monitor(id).await,
        BulkAction::Resume => client.resume_monitor(id).await,
    }
}
