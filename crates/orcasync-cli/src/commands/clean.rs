use super::common::{RunOptions, finish};

pub struct Clean;

impl Clean {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        let engine = options.engine()?;
        println!(
            "Removing managed profiles from {}",
            engine.settings().user_dir.display()
        );

        let report = engine.clean(options.approver())?;
        finish(&report, options.dry_run)
    }
}
