use anyhow::bail;

use super::common::RunOptions;
use crate::cli::GitAction;
use crate::git::GitRunner;

pub struct Git;

impl Git {
    pub fn execute(
        options: &RunOptions,
        action: GitAction,
        message: Option<&str>,
        branch: Option<&str>,
    ) -> anyhow::Result<()> {
        let steps = Self::steps(action, message, branch)?;
        let settings = options.settings()?;
        let git = GitRunner::new(&settings.local_dir);

        for args in &steps {
            println!("Running git {} in {}", args.join(" "), git.root().display());
            if options.dry_run {
                continue;
            }

            let output = git.run(args)?;
            if !output.stdout.is_empty() {
                print!("{}", output.stdout);
            }
            if !output.stderr.trim().is_empty() {
                eprintln!("{}", output.stderr.trim_end());
            }
            if !output.success {
                bail!("git {} failed", args.join(" "));
            }
        }

        if options.dry_run {
            println!("Dry run: git was not invoked.");
        }
        Ok(())
    }

    /// Argument lists to run, in order
    fn steps(
        action: GitAction,
        message: Option<&str>,
        branch: Option<&str>,
    ) -> anyhow::Result<Vec<Vec<String>>> {
        let args = |parts: &[&str]| parts.iter().map(ToString::to_string).collect::<Vec<_>>();

        let steps = match action {
            GitAction::Status => vec![args(&["status"])],
            GitAction::Fetch => vec![args(&["fetch"])],
            GitAction::Pull => vec![args(&["pull"])],
            GitAction::Push => vec![args(&["push"])],
            GitAction::Commit => {
                let Some(message) = message else {
                    bail!("Commit message required. Use: -m 'Your message'");
                };
                vec![args(&["add", "."]), args(&["commit", "-m", message])]
            }
            GitAction::Rebase => vec![args(&["pull", "--rebase"])],
            GitAction::Branch => vec![args(&["branch", "-vv"])],
            GitAction::Checkout => {
                let Some(branch) = branch else {
                    bail!("Branch name required. Use: -b branch-name");
                };
                vec![args(&["checkout", branch])]
            }
        };
        Ok(steps)
    }
}
