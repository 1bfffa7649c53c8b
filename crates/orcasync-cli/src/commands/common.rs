//! Common types and utilities for command execution

use std::path::Path;

use anyhow::{Context, bail};
use orcasync_core::comparison::EntryStatus;
use orcasync_core::config::{Config, ConfigManager};
use orcasync_core::sync::{
    ApprovalCallback, OperationReport, RecordStatus, ReportRecord, SyncOutcome, SyncReporter,
};
use orcasync_core::{Issue, Settings, SyncEngine};

use crate::cli::Cli;
use crate::interactive::InteractivePrompter;

/// Execution options shared by every command
#[allow(clippy::struct_excessive_bools)]
pub struct RunOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
    /// Auto-approve all operations without prompting
    pub yes: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
    /// OrcaSlicer user tree override
    pub user_path: Option<&'a Path>,
    /// Local mirror override
    pub local_path: Option<&'a Path>,
    /// Backup directory override
    pub backup_path: Option<&'a Path>,
}

impl<'a> RunOptions<'a> {
    /// Options from parsed global flags
    pub fn from_cli(cli: &'a Cli) -> Self {
        Self {
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            yes: cli.yes,
            config_path: cli.config.as_deref(),
            no_config: cli.no_config,
            user_path: cli.user_path.as_deref(),
            local_path: cli.local_path.as_deref(),
            backup_path: cli.backup_path.as_deref(),
        }
    }

    /// Merged configuration files with path flags applied on top
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = if self.no_config {
            Config::default()
        } else {
            ConfigManager::load(self.config_path)?
        };

        if let Some(path) = self.user_path {
            config.paths.user_dir = Some(path.to_path_buf());
        }
        if let Some(path) = self.local_path {
            config.paths.local_dir = Some(path.to_path_buf());
        }
        if let Some(path) = self.backup_path {
            config.paths.backup_dir = Some(path.to_path_buf());
        }

        Ok(config)
    }

    /// Resolved settings for the engine
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let config = self.load_config()?;
        let mut settings = Settings::resolve(&config).context("Invalid configuration")?;
        if self.dry_run {
            settings.dry_run = true;
        }
        Ok(settings)
    }

    pub fn engine(&self) -> anyhow::Result<SyncEngine> {
        Ok(SyncEngine::new(self.settings()?))
    }

    /// Confirmation gate; `--yes` approves everything
    pub fn approver(&self) -> Option<ApprovalCallback> {
        if self.yes {
            None
        } else {
            Some(InteractivePrompter::approver())
        }
    }
}

/// Human label of a comparison status (user tree = Orca, local mirror = Git)
pub const fn entry_label(status: EntryStatus) -> &'static str {
    match status {
        EntryStatus::OnlyA => "only in Orca",
        EntryStatus::OnlyB => "only in Git",
        EntryStatus::Same => "same",
        EntryStatus::ANewer => "Orca newer",
        EntryStatus::BNewer => "Git newer",
        EntryStatus::Differs => "differs",
    }
}

/// Status column text for a report row
pub fn record_label(record: &ReportRecord) -> String {
    match &record.status {
        RecordStatus::Compared(status) => entry_label(*status).to_string(),
        RecordStatus::Held => "newer at destination".to_string(),
        RecordStatus::BackedUp => "backed up".to_string(),
        other => other.label().to_string(),
    }
}

pub fn print_issues(issues: &[Issue]) {
    for issue in issues {
        eprintln!("Warning: {issue}");
    }
}

pub fn warn_about_backups(engine: &SyncEngine) {
    match engine.backup_warning() {
        Ok(Some(count)) => {
            eprintln!("Warning: You have {count} backups stored.");
            eprintln!("   Consider cleaning up old backups to save disk space.");
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %format!("{e:#}"), "cannot count backups"),
    }
}

/// Print an operation's outcome; held transfers and failed file operations
/// become errors
pub fn finish(report: &OperationReport, dry_run: bool) -> anyhow::Result<()> {
    print_issues(&report.issues);

    match &report.outcome {
        SyncOutcome::UpToDate => println!("Nothing to do: profiles are up to date."),
        SyncOutcome::Declined => println!("Aborted."),
        SyncOutcome::Held(records) => {
            eprintln!("The following profiles are newer at the destination:");
            eprint!("{}", SyncReporter::render_table(records, record_label));
            bail!(
                "{} profile(s) held back; re-run with --force to overwrite them \
                 or --skip-divergent to leave them untouched",
                records.len()
            );
        }
        SyncOutcome::Completed(result) => {
            if let Some(snapshot) = &report.backup {
                println!("Backup saved to {}", snapshot.path.display());
            }
            print!("{}", SyncReporter::render_table(&result.records, record_label));
            println!("{}", SyncReporter::generate_summary(result));
            if dry_run {
                println!("Dry run: no files were changed.");
            }
            if !result.is_success() {
                bail!("{} file operation(s) failed", result.errors.len());
            }
        }
    }

    Ok(())
}
