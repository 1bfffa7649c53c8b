use orcasync_core::sync::TransferPolicy;

use super::common::{RunOptions, finish};

pub struct Fetch;

impl Fetch {
    pub fn execute(
        options: &RunOptions,
        filter: Option<&str>,
        force: bool,
        skip_divergent: bool,
    ) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let settings = engine.settings();
        println!(
            "Fetching profiles from {} into {}",
            settings.user_dir.display(),
            settings.local_dir.display()
        );

        let policy = TransferPolicy {
            force,
            skip_divergent,
        };
        let report = engine.fetch(filter, policy, options.approver())?;
        finish(&report, options.dry_run)
    }
}
