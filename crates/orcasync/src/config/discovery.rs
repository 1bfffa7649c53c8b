//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

/// Project-local config file name (highest file precedence after the CLI flag)
pub const LOCAL_CONFIG_NAME: &str = ".orcasync.local.toml";

/// Project config file name
pub const PROJECT_CONFIG_NAME: &str = ".orcasync.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project-local config (.orcasync.local.toml)
    pub local: Option<PathBuf>,
    /// Project config (.orcasync.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

impl ConfigFiles {
    /// Discovered files from lowest to highest precedence
    pub fn in_merge_order(&self) -> impl Iterator<Item = &Path> {
        [&self.global, &self.project, &self.local, &self.cli]
            .into_iter()
            .filter_map(|p| p.as_deref())
    }
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files
    ///
    /// A CLI path that does not exist is dropped here; [`super::ConfigManager`]
    /// reports it.
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let cli = cli_path.filter(|p| p.is_file()).map(Path::to_path_buf);

        ConfigFiles {
            cli,
            local: Self::find_file(LOCAL_CONFIG_NAME),
            project: Self::find_file(PROJECT_CONFIG_NAME),
            global: Self::find_global_config(),
        }
    }

    /// Find a config file in the current directory or parent directories
    fn find_file(name: &str) -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let global_config = dirs::config_dir()?.join("orcasync").join("config.toml");
        global_config.is_file().then_some(global_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_cli_config() {
        let tmp = TempDir::new().unwrap();
        let cli_config = tmp.path().join("custom.toml");
        fs::write(&cli_config, "# config").unwrap();

        let files = ConfigDiscovery::discover(Some(&cli_config));

        assert_eq!(files.cli, Some(cli_config));
    }

    #[test]
    fn test_discover_cli_config_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let cli_config = tmp.path().join("nonexistent.toml");

        let files = ConfigDiscovery::discover(Some(&cli_config));

        assert!(files.cli.is_none());
    }

    #[test]
    fn test_merge_order_is_lowest_first() {
        let files = ConfigFiles {
            cli: Some(PathBuf::from("cli.toml")),
            local: None,
            project: Some(PathBuf::from("project.toml")),
            global: Some(PathBuf::from("global.toml")),
        };

        let order: Vec<_> = files.in_merge_order().collect();
        assert_eq!(
            order,
            [
                Path::new("global.toml"),
                Path::new("project.toml"),
                Path::new("cli.toml")
            ]
        );
    }
}
