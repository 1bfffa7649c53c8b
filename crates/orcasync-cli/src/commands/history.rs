use std::path::PathBuf;

use anyhow::bail;
use orcasync_core::Category;
use orcasync_core::config::Settings;
use orcasync_core::scanner::Scanner;

use super::common::{RunOptions, print_issues};
use crate::git::GitRunner;
use crate::interactive::InteractivePrompter;

pub struct History;

impl History {
    pub fn execute(options: &RunOptions, filename: Option<&str>) -> anyhow::Result<()> {
        let settings = options.settings()?;

        let target = match filename {
            Some(name) => PathBuf::from(name),
            None => {
                if options.yes {
                    bail!("A profile filename is required with --yes");
                }
                match Self::pick(&settings)? {
                    Some(path) => path,
                    None => {
                        println!("Aborted.");
                        return Ok(());
                    }
                }
            }
        };

        let matches: Vec<_> = Category::ALL
            .into_iter()
            .map(|category| (category, category.root_in(&settings.local_dir).path.join(&target)))
            .filter(|(_, path)| path.is_file())
            .collect();

        if matches.is_empty() {
            bail!("File '{}' not found in local folders", target.display());
        }

        let git = GitRunner::new(&settings.local_dir);
        for (category, path) in matches {
            println!("\nGit history for: {category}/{}\n", target.display());
            let output = git.log(&path)?;
            if output.stdout.trim().is_empty() {
                println!("  No history found.");
            } else {
                println!("{}", output.stdout);
            }
        }

        Ok(())
    }

    /// Choose one of the managed profiles in the local mirror
    fn pick(settings: &Settings) -> anyhow::Result<Option<PathBuf>> {
        let scanner = Scanner::new(settings.managed_filter());
        let mut profiles = Vec::new();
        for category in Category::ALL {
            let scan = scanner.scan(&category.root_in(&settings.local_dir).path);
            print_issues(&scan.issues);
            profiles.extend(scan.files.into_iter().map(|path| (category, path)));
        }

        if profiles.is_empty() {
            bail!("No managed profiles found in {}", settings.local_dir.display());
        }

        let items: Vec<String> = profiles
            .iter()
            .map(|(category, path)| format!("{category}/{}", path.display()))
            .collect();
        let Some(index) = InteractivePrompter::select("Select a profile to view Git history", &items)?
        else {
            return Ok(None);
        };
        Ok(Some(profiles.swap_remove(index).1))
    }
}
