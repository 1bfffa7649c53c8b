use orcasync_core::sync::TransferPolicy;

use super::common::{RunOptions, finish};

pub struct Push;

impl Push {
    /// Mirror the local tree into OrcaSlicer, or copy new and newer profiles
    /// only with `merge`
    pub fn execute(
        options: &RunOptions,
        merge: bool,
        force: bool,
        skip_divergent: bool,
    ) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let settings = engine.settings();
        println!(
            "Pushing profiles from {} to {}",
            settings.local_dir.display(),
            settings.user_dir.display()
        );

        let report = if merge {
            let policy = TransferPolicy {
                force,
                skip_divergent,
            };
            engine.push_merge(policy, options.approver())?
        } else {
            engine.push(options.approver())?
        };

        finish(&report, options.dry_run)
    }
}
