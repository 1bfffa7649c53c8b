use orcasync_core::comparison::{CompareMode, DiffGenerator, EntryStatus};

use super::common::{RunOptions, entry_label, print_issues};

const NAME_WIDTH: usize = 60;
const STATUS_WIDTH: usize = 20;

pub struct Diff;

impl Diff {
    /// Compare OrcaSlicer (A) with the local mirror (B), by content unless
    /// `mtime` is set
    pub fn execute(options: &RunOptions, all: bool, details: bool, mtime: bool) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let mode = if mtime {
            CompareMode::Timestamp
        } else {
            CompareMode::Content
        };
        let settings = engine.settings();

        println!("Comparing OrcaSlicer profiles with local git-tracked profiles:");
        if options.verbose {
            println!("  orca: {}", settings.user_dir.display());
            println!("  git:  {}", settings.local_dir.display());
        }

        let mut changed = 0;
        for section in engine.status(mode, None) {
            print_issues(&section.comparison.issues);

            let rows: Vec<_> = section
                .comparison
                .entries
                .iter()
                .filter(|entry| all || entry.status != EntryStatus::Same)
                .collect();
            if rows.is_empty() {
                continue;
            }

            println!("\n[{}]", section.category);
            println!("{:<NAME_WIDTH$} {:<STATUS_WIDTH$}", "Filename", "Status");
            println!("{}", "-".repeat(NAME_WIDTH + STATUS_WIDTH));

            for entry in rows {
                if entry.status != EntryStatus::Same {
                    changed += 1;
                }
                let name = entry.relative_path.display().to_string();
                println!(
                    "{name:<NAME_WIDTH$} {:<STATUS_WIDTH$}",
                    entry_label(entry.status)
                );

                if details && entry.status.is_diverged() {
                    let category = section.category;
                    let git = category.root_in(&settings.local_dir).path.join(&entry.relative_path);
                    let orca = category.root_in(&settings.user_dir).path.join(&entry.relative_path);
                    match DiffGenerator::unified(
                        &git,
                        &orca,
                        &format!("git/{category}/{name}"),
                        &format!("orca/{category}/{name}"),
                    ) {
                        Ok(diff) => {
                            println!("    --- Git version vs Orca version ---");
                            for line in diff.lines() {
                                println!("    {line}");
                            }
                        }
                        Err(e) => println!("    [Error showing diff: {e:#}]"),
                    }
                }
            }
        }

        if changed == 0 {
            println!("\nAll managed profiles are in sync.");
        } else {
            println!("\n{changed} profile(s) differ.");
        }

        Ok(())
    }
}
