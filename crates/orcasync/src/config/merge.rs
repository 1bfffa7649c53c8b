//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Lists** (`ignore`, `include`, `extensions`): additive, values from all
//!   configs are combined in precedence order
//! - **Options** (paths, `markers`, `backup_warning_limit`,
//!   `required_fields`, `dry_run`): a higher-precedence file that sets a value
//!   replaces whatever lower-precedence files set

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .orcasync.local.toml
    /// 3. .orcasync.toml
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        for path in files.in_merge_order() {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load and merge a single config file into the existing config
    fn merge_into(base: &mut Config, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Self::overlay(base, config);
        Ok(())
    }

    /// Apply a higher-precedence config on top of `base`
    pub fn overlay(base: &mut Config, config: Config) {
        base.ignore.extend(config.ignore);
        base.include.extend(config.include);
        for ext in config.extensions {
            if !base.extensions.contains(&ext) {
                base.extensions.push(ext);
            }
        }

        if config.paths.user_dir.is_some() {
            base.paths.user_dir = config.paths.user_dir;
        }
        if config.paths.local_dir.is_some() {
            base.paths.local_dir = config.paths.local_dir;
        }
        if config.paths.backup_dir.is_some() {
            base.paths.backup_dir = config.paths.backup_dir;
        }
        if config.markers.is_some() {
            base.markers = config.markers;
        }
        if config.backup_warning_limit.is_some() {
            base.backup_warning_limit = config.backup_warning_limit;
        }
        if config.required_fields.is_some() {
            base.required_fields = config.required_fields;
        }
        if config.dry_run.is_some() {
            base.dry_run = config.dry_run;
        }
    }
}
