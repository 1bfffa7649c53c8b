use anyhow::{Context, bail};
use orcasync_core::backup::Snapshot;
use orcasync_core::SyncEngine;

use super::common::{RunOptions, finish};
use crate::interactive::InteractivePrompter;

pub struct Restore;

impl Restore {
    pub fn execute(options: &RunOptions, snapshot: Option<&str>) -> anyhow::Result<()> {
        let engine = options.engine()?;
        println!("Restoring a backup to OrcaSlicer...");

        let snapshot = match snapshot {
            Some(id) => engine.find_snapshot(id)?,
            None => match Self::pick(&engine, options.yes)? {
                Some(snapshot) => snapshot,
                None => {
                    println!("Aborted.");
                    return Ok(());
                }
            },
        };

        let report = engine.restore(&snapshot, options.approver())?;
        finish(&report, options.dry_run)
    }

    /// Let the user choose a snapshot, newest first
    fn pick(engine: &SyncEngine, yes: bool) -> anyhow::Result<Option<Snapshot>> {
        let mut snapshots = engine.backups().context("Failed to list backups")?;
        if snapshots.is_empty() {
            bail!(
                "No backups available to restore in {}",
                engine.settings().backup_dir.display()
            );
        }
        if yes {
            bail!("A backup id is required with --yes");
        }

        let ids: Vec<String> = snapshots.iter().map(|s| s.id.clone()).collect();
        let Some(index) = InteractivePrompter::select("Select a backup to restore", &ids)? else {
            return Ok(None);
        };
        Ok(Some(snapshots.swap_remove(index)))
    }
}
