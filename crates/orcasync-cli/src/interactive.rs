//! Interactive prompting for profile operations

use anyhow::{Context, Result};
use dialoguer::{Confirm, Select};
use orcasync_core::sync::{ApprovalCallback, Proposal, SyncReporter};

use crate::commands::common::record_label;

/// Interactive prompter for the confirmation gate and pickers
pub struct InteractivePrompter;

impl InteractivePrompter {
    /// Show what an operation is about to do and ask whether to continue
    ///
    /// Defaults to "no".
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails.
    pub fn approve(proposal: &Proposal) -> Result<bool> {
        println!();
        print!(
            "{}",
            SyncReporter::render_table(&proposal.records, record_label)
        );
        println!();

        Confirm::new()
            .with_prompt(proposal.operation.prompt())
            .default(false)
            .interact()
            .context("Failed to show prompt")
    }

    /// Approval callback backed by [`Self::approve`]
    pub fn approver() -> ApprovalCallback {
        Box::new(|proposal: &Proposal| Self::approve(proposal))
    }

    /// Pick one of `items`; `None` when the user cancels
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal interaction fails.
    pub fn select(prompt: &str, items: &[String]) -> Result<Option<usize>> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .context("Failed to show prompt")
    }
}
