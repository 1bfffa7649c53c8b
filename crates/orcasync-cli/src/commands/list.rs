use chrono::{DateTime, Local};
use orcasync_core::Category;
use orcasync_core::sync::ProfileListing;

use super::common::{RunOptions, print_issues};
use crate::git::GitRunner;

const NAME_WIDTH: usize = 60;
const COLUMN_WIDTH: usize = 20;

pub struct List;

impl List {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let settings = engine.settings();
        let git = GitRunner::new(&settings.local_dir);

        println!("Listing managed profiles in OrcaSlicer:");
        let (profiles, issues) = engine.list();
        print_issues(&issues);

        if profiles.is_empty() {
            println!("\nNo managed profiles found.");
            return Ok(());
        }

        let mut current: Option<Category> = None;
        for profile in &profiles {
            if current != Some(profile.category) {
                println!("\n[{}]", profile.category);
                println!(
                    "{:<NAME_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$}",
                    "Filename", "Modified", "Last Edited By"
                );
                println!("{}", "-".repeat(NAME_WIDTH + 2 * COLUMN_WIDTH));
                current = Some(profile.category);
            }

            let tracked = profile
                .category
                .root_in(&settings.local_dir)
                .path
                .join(&profile.relative_path);
            let author = git.last_author(&tracked).unwrap_or_else(|| "-".to_string());

            println!(
                "{:<NAME_WIDTH$} {:<COLUMN_WIDTH$} {:<COLUMN_WIDTH$}",
                Self::display_name(profile),
                Self::modified(profile),
                author
            );
        }

        Ok(())
    }

    fn display_name(profile: &ProfileListing) -> String {
        let name = profile.relative_path.display().to_string();
        if name.chars().count() > NAME_WIDTH {
            let head: String = name.chars().take(NAME_WIDTH - 3).collect();
            format!("{head}...")
        } else {
            name
        }
    }

    fn modified(profile: &ProfileListing) -> String {
        profile.modified.map_or_else(
            || "-".to_string(),
            |time| {
                DateTime::<Local>::from(time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn listing(name: &str) -> ProfileListing {
        ProfileListing {
            category: Category::Filament,
            relative_path: PathBuf::from(name),
            modified: None,
        }
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long = format!("ODG_{}.json", "x".repeat(70));
        let shown = List::display_name(&listing(&long));
        assert_eq!(shown.chars().count(), 60);
        assert!(shown.ends_with("..."));

        assert_eq!(List::display_name(&listing("ODG_PLA.json")), "ODG_PLA.json");
    }

    #[test]
    fn test_missing_mtime_shows_dash() {
        assert_eq!(List::modified(&listing("ODG_PLA.json")), "-");
    }
}
