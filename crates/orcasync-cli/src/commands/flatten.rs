use orcasync_core::Category;
use orcasync_core::inheritance::FlattenDepth;

use super::common::{RunOptions, finish};

pub struct Flatten;

impl Flatten {
    pub fn execute(options: &RunOptions, categories: &[Category], transitive: bool) -> anyhow::Result<()> {
        let engine = options.engine()?;
        let depth = if transitive {
            FlattenDepth::Transitive
        } else {
            FlattenDepth::SinglePass
        };

        let names: Vec<_> = categories.iter().map(|c| c.dir_name()).collect();
        println!("Flattening inherited profiles in: {}", names.join(", "));

        let report = engine.flatten(categories, depth, options.approver())?;
        finish(&report, options.dry_run)
    }
}
