use orcasync_core::comparison::{CompareMode, EntryStatus};
use orcasync_core::sync::{RecordStatus, ReportRecord, SyncReporter};

use super::common::{RunOptions, print_issues, record_label};

pub struct Status;

impl Status {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let sections = engine.status(CompareMode::Timestamp, None);

        let mut records = Vec::new();
        for section in &sections {
            print_issues(&section.comparison.issues);
            records.extend(section.comparison.changes().map(|entry| {
                ReportRecord::new(
                    section.category,
                    entry.relative_path.clone(),
                    RecordStatus::Compared(entry.status),
                )
                .with_note(Self::hint(entry.status))
            }));
        }

        if records.is_empty() {
            println!("All managed profiles are in sync.");
            return Ok(());
        }

        print!("{}", SyncReporter::render_table(&records, record_label));
        Ok(())
    }

    /// Command that would move the entry
    const fn hint(status: EntryStatus) -> &'static str {
        match status {
            EntryStatus::OnlyA | EntryStatus::ANewer => "-> fetch",
            EntryStatus::OnlyB | EntryStatus::BNewer => "-> push",
            EntryStatus::Differs => "-> diff --details",
            EntryStatus::Same => "",
        }
    }
}
