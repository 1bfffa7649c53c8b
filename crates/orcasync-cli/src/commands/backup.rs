use orcasync_core::sync::SyncReporter;

use super::common::{RunOptions, print_issues, record_label};

pub struct Backup;

impl Backup {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let report = engine.backup()?;

        println!(
            "Backing up OrcaSlicer profiles to: {}",
            report.snapshot.profile_root().display()
        );
        print_issues(&report.issues);

        if report.result.records.is_empty() {
            println!("No managed profiles found.");
        } else {
            print!(
                "{}",
                SyncReporter::render_table(&report.result.records, record_label)
            );
        }

        if options.dry_run {
            println!("Dry run: no backup was written.");
        } else {
            println!("Backup {} created.", report.snapshot.id);
        }

        if !report.result.is_success() {
            anyhow::bail!(
                "Backup {} failed with {} error(s)",
                report.snapshot.id,
                report.result.errors.len()
            );
        }

        Ok(())
    }
}
