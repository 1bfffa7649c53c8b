//! Runtime settings resolved from a merged [`Config`]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::patterns::PatternMatcher;
use super::types::{Config, DEFAULT_BACKUP_WARNING_LIMIT, DEFAULT_MARKERS};
use crate::error::Result;
use crate::profile::Category;
use crate::scanner::{MarkerSet, ScanFilter};

/// Fully resolved settings shared by every engine operation
#[derive(Debug, Clone)]
pub struct Settings {
    /// OrcaSlicer user profile tree
    pub user_dir: PathBuf,
    /// Version-controlled local mirror tree
    pub local_dir: PathBuf,
    /// Backup snapshot directory
    pub backup_dir: PathBuf,
    /// Managed-profile markers
    pub markers: MarkerSet,
    /// Extension allow-list (empty allows all)
    pub extensions: Vec<String>,
    /// Compiled ignore/include patterns
    pub patterns: Option<PatternMatcher>,
    /// Backup count that triggers a cleanup warning
    pub backup_warning_limit: usize,
    /// Required top-level fields per category
    pub required_fields: BTreeMap<Category, Vec<String>>,
    /// Plan and report only
    pub dry_run: bool,
}

impl Settings {
    /// Resolve a merged configuration, filling in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if patterns fail to compile, a category name is
    /// unknown, or the platform config directory cannot be determined.
    pub fn resolve(config: &Config) -> Result<Self> {
        let user_dir = match &config.paths.user_dir {
            Some(dir) => dir.clone(),
            None => default_user_dir()?,
        };

        let mut settings = Self::for_trees(
            user_dir,
            config
                .paths
                .local_dir
                .clone()
                .unwrap_or_else(|| Path::new("orca_profiles").join("default")),
            config
                .paths
                .backup_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from("backups")),
        );

        if let Some(markers) = &config.markers {
            settings.markers = MarkerSet::new(markers.iter().cloned());
        }
        settings.extensions.clone_from(&config.extensions);
        settings.patterns = PatternMatcher::from_lists(&config.ignore, &config.include)?;
        if let Some(limit) = config.backup_warning_limit {
            settings.backup_warning_limit = limit;
        }
        if let Some(required) = &config.required_fields {
            settings.required_fields = required
                .iter()
                .map(|(category, fields)| -> Result<(Category, Vec<String>)> {
                    Ok((category.parse()?, fields.clone()))
                })
                .collect::<Result<_>>()?;
        }
        settings.dry_run = config.dry_run.unwrap_or(false);

        Ok(settings)
    }

    /// Settings for explicit tree locations with default rules
    #[must_use]
    pub fn for_trees(
        user_dir: impl Into<PathBuf>,
        local_dir: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        let mut required_fields = BTreeMap::new();
        required_fields.insert(
            Category::Filament,
            vec!["filament_settings_id".to_string()],
        );

        Self {
            user_dir: user_dir.into(),
            local_dir: local_dir.into(),
            backup_dir: backup_dir.into(),
            markers: MarkerSet::new(DEFAULT_MARKERS),
            extensions: Vec::new(),
            patterns: None,
            backup_warning_limit: DEFAULT_BACKUP_WARNING_LIMIT,
            required_fields,
            dry_run: false,
        }
    }

    /// Filter selecting managed profiles for sync scans
    #[must_use]
    pub fn managed_filter(&self) -> ScanFilter {
        ScanFilter::new(self.markers.clone())
            .with_extensions(&self.extensions)
            .with_patterns(self.patterns.clone())
    }

    /// Required fields for one category
    #[must_use]
    pub fn required_fields_for(&self, category: Category) -> &[String] {
        self.required_fields
            .get(&category)
            .map_or(&[], Vec::as_slice)
    }
}

fn default_user_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
    Ok(config_dir.join("OrcaSlicer").join("user").join("default"))
}
