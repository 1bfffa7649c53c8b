mod cli;
mod commands;
mod git;
mod interactive;
mod logging;

use anyhow::Context;
use clap::Parser;
use cli::{CategoryArg, Cli, Commands};
use commands::common::{RunOptions, warn_about_backups};

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.dry_run)?;

    let options = RunOptions::from_cli(&cli);
    tracing::debug!(dry_run = options.dry_run, yes = options.yes, "starting");

    if let Commands::Config = &cli.command {
        return commands::Config::execute(&options).context("Failed to execute config command");
    }

    warn_about_backups(&options.engine()?);

    match &cli.command {
        Commands::Backup => {
            commands::Backup::execute(&options).context("Failed to execute backup command")?;
        }
        Commands::Fetch {
            filter,
            force,
            skip_divergent,
        } => {
            commands::Fetch::execute(&options, filter.as_deref(), *force, *skip_divergent)
                .context("Failed to execute fetch command")?;
        }
        Commands::Push {
            merge,
            force,
            skip_divergent,
        } => {
            commands::Push::execute(&options, *merge, *force, *skip_divergent)
                .context("Failed to execute push command")?;
        }
        Commands::Diff { all, details, mtime } => {
            commands::Diff::execute(&options, *all, *details, *mtime)
                .context("Failed to execute diff command")?;
        }
        Commands::Status => {
            commands::Status::execute(&options).context("Failed to execute status command")?;
        }
        Commands::Validate => {
            commands::Validate::execute(&options).context("Failed to execute validate command")?;
        }
        Commands::Flatten {
            categories,
            transitive,
        } => {
            commands::Flatten::execute(&options, &CategoryArg::resolve(categories), *transitive)
                .context("Failed to execute flatten command")?;
        }
        Commands::Restore { snapshot } => {
            commands::Restore::execute(&options, snapshot.as_deref())
                .context("Failed to execute restore command")?;
        }
        Commands::Clean => {
            commands::Clean::execute(&options).context("Failed to execute clean command")?;
        }
        Commands::List => {
            commands::List::execute(&options).context("Failed to execute list command")?;
        }
        Commands::History { filename } => {
            commands::History::execute(&options, filename.as_deref())
                .context("Failed to execute history command")?;
        }
        Commands::Git {
            action,
            message,
            branch,
        } => {
            commands::Git::execute(&options, *action, message.as_deref(), branch.as_deref())
                .context("Failed to execute git command")?;
        }
        Commands::Config => {}
    }

    Ok(())
}
