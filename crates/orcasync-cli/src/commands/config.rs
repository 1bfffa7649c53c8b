use orcasync_core::config::ConfigDiscovery;

use super::common::RunOptions;

pub struct Config;

impl Config {
    pub fn execute(options: &RunOptions) -> anyhow::Result<()> {
        println!("Configuration files (lowest to highest precedence):");
        if options.no_config {
            println!("  (disabled by --no-config)");
        } else {
            let files = ConfigDiscovery::discover(options.config_path);
            let mut found = false;
            for path in files.in_merge_order() {
                println!("  {}", path.display());
                found = true;
            }
            if !found {
                println!("  (none found, using defaults)");
            }
        }

        let config = options.load_config()?;
        let settings = options.settings()?;

        println!("\nResolved settings:");
        println!("  user_dir:             {}", settings.user_dir.display());
        println!("  local_dir:            {}", settings.local_dir.display());
        println!("  backup_dir:           {}", settings.backup_dir.display());
        println!("  markers:              {:?}", settings.markers.markers());
        println!("  extensions:           {:?}", settings.extensions);
        println!("  ignore:               {:?}", config.ignore);
        println!("  include:              {:?}", config.include);
        println!("  backup_warning_limit: {}", settings.backup_warning_limit);
        for (category, fields) in &settings.required_fields {
            println!("  required[{category}]: {fields:?}");
        }
        println!("  dry_run:              {}", settings.dry_run);

        Ok(())
    }
}
