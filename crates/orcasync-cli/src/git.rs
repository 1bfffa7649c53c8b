//! `git` subprocess runner scoped to the local mirror

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;

/// Captured output of one git invocation
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs git with the local mirror as working directory
pub struct GitRunner {
    root: PathBuf,
}

impl GitRunner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run `git <args>` and capture its output
    pub fn run<I, S>(&self, args: I) -> anyhow::Result<GitOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.root)
            .output()
            .with_context(|| {
                format!(
                    "Failed to run git {} in {}",
                    args.iter()
                        .map(|a| a.to_string_lossy())
                        .collect::<Vec<_>>()
                        .join(" "),
                    self.root.display()
                )
            })?;

        Ok(GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }

    /// Author of the last commit touching `path`, if any
    pub fn last_author(&self, path: &Path) -> Option<String> {
        let output = self
            .run([
                OsStr::new("log"),
                OsStr::new("-1"),
                OsStr::new("--pretty=format:%an"),
                OsStr::new("--"),
                path.as_os_str(),
            ])
            .ok()?;

        let author = output.stdout.trim();
        (output.success && !author.is_empty()).then(|| author.to_string())
    }

    /// Full commit log of `path`
    pub fn log(&self, path: &Path) -> anyhow::Result<GitOutput> {
        self.run([OsStr::new("log"), OsStr::new("--"), path.as_os_str()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_last_author_outside_repository_is_none() {
        let tmp = TempDir::new().unwrap();
        let runner = GitRunner::new(tmp.path());
        assert_eq!(runner.last_author(&tmp.path().join("ODG_PLA.json")), None);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let runner = GitRunner::new(tmp.path().join("missing"));
        assert!(runner.run(["status"]).is_err());
    }
}
