//! Sync operation reporting and statistics

use std::fmt::Write;
use std::path::PathBuf;

use super::SyncResult;
use crate::comparison::EntryStatus;
use crate::profile::Category;

/// Status or action recorded for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordStatus {
    /// Comparison result
    Compared(EntryStatus),
    /// New file written at the destination
    Created,
    /// Existing destination file replaced
    Updated,
    /// File removed
    Deleted,
    /// Diverged entry dropped on request
    Skipped,
    /// Diverged entry blocking the plan
    Held,
    /// File copied into a snapshot
    BackedUp,
    /// Document rewritten without inheritance
    Flattened,
}

impl RecordStatus {
    /// Machine-friendly label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Compared(status) => status.label(),
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Skipped => "skipped",
            Self::Held => "held",
            Self::BackedUp => "backed_up",
            Self::Flattened => "flattened",
        }
    }
}

/// One report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    /// Category folder the file lives in
    pub category: Category,
    /// Path relative to the category folder
    pub relative_path: PathBuf,
    /// Status or action
    pub status: RecordStatus,
    /// Optional detail (inherited keys, reasons)
    pub note: Option<String>,
}

impl ReportRecord {
    /// Record without a note
    #[must_use]
    pub const fn new(category: Category, relative_path: PathBuf, status: RecordStatus) -> Self {
        Self {
            category,
            relative_path,
            status,
            note: None,
        }
    }

    /// Attach a note
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

const NAME_WIDTH: usize = 60;
const STATUS_WIDTH: usize = 20;

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(result: &SyncResult) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Created:  {}", result.created);
        let _ = writeln!(output, "Updated:  {}", result.updated);
        let _ = writeln!(output, "Deleted:  {}", result.deleted);
        let _ = writeln!(output, "Skipped:  {}", result.skipped);

        if !result.errors.is_empty() {
            let _ = writeln!(output, "\nErrors ({}):", result.errors.len());
            for error in &result.errors {
                let _ = writeln!(output, "  - {error}");
            }
        }

        let _ = writeln!(output, "\nTotal operations: {}", result.total_operations());

        if result.is_success() {
            output.push_str("Status: ✓ Success\n");
        } else {
            output.push_str("Status: ✗ Completed with errors\n");
        }

        output
    }

    /// Render records as per-category `Filename / Status` tables
    ///
    /// Records must be grouped by category (engine output already is).
    #[must_use]
    pub fn render_table<F>(records: &[ReportRecord], label: F) -> String
    where
        F: Fn(&ReportRecord) -> String,
    {
        let mut output = String::new();
        let mut current: Option<Category> = None;

        for record in records {
            if current != Some(record.category) {
                if current.is_some() {
                    output.push('\n');
                }
                let _ = writeln!(output, "[{}]", record.category);
                let _ = writeln!(
                    output,
                    "{:<NAME_WIDTH$} {:<STATUS_WIDTH$}",
                    "Filename", "Status"
                );
                let _ = writeln!(output, "{}", "-".repeat(NAME_WIDTH + STATUS_WIDTH));
                current = Some(record.category);
            }

            let _ = write!(
                output,
                "{:<NAME_WIDTH$} {:<STATUS_WIDTH$}",
                record.relative_path.display().to_string(),
                label(record)
            );
            if let Some(note) = &record.note {
                let _ = write!(output, " {note}");
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_reporter() {
        let result = SyncResult {
            created: 5,
            updated: 3,
            skipped: 2,
            ..SyncResult::default()
        };

        let summary = SyncReporter::generate_summary(&result);

        assert!(summary.contains("Created:  5"));
        assert!(summary.contains("Updated:  3"));
        assert!(summary.contains("Skipped:  2"));
        assert!(summary.contains("Total operations: 8"));
        assert!(summary.contains("✓ Success"));
    }

    #[test]
    fn test_sync_reporter_with_errors() {
        let mut result = SyncResult {
            created: 1,
            ..SyncResult::default()
        };
        result.errors.push("ODG_PLA.json: permission denied".to_string());

        let summary = SyncReporter::generate_summary(&result);

        assert!(summary.contains("Errors (1)"));
        assert!(summary.contains("permission denied"));
        assert!(summary.contains("✗ Completed with errors"));
    }

    #[test]
    fn test_table_groups_by_category() {
        let records = vec![
            ReportRecord::new(Category::Filament, PathBuf::from("ODG_PLA.json"), RecordStatus::Created),
            ReportRecord::new(Category::Process, PathBuf::from("ODG_0.2mm.json"), RecordStatus::Deleted)
                .with_note("(stale)"),
        ];

        let table = SyncReporter::render_table(&records, |r| r.status.label().to_string());

        assert!(table.starts_with("[filament]\nFilename"));
        assert!(table.contains("[process]"));
        assert!(table.contains(&"-".repeat(80)));
        assert!(table.contains(&format!("{:<60} {:<20}", "ODG_PLA.json", "created")));
        assert!(table.contains("deleted              (stale)"));
    }

    #[test]
    fn test_compared_label_uses_entry_status() {
        assert_eq!(RecordStatus::Compared(EntryStatus::OnlyA).label(), "only_a");
    }
}
