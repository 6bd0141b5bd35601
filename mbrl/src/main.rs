//! # mbrl
//!
//! `mbrl rollout` runs episodes of the ant environment and prints a JSON
//! summary on stdout. `mbrl info` prints the environment's spaces and model
//! counts. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use mbrl::cli::{level, Cli, Command};
use mbrl::rl::{ant::METADATA, AntTruncatedObsEnv};
use mbrl::{describe, run, RolloutConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Rollout(args) => {
            let config = RolloutConfig::resolve(args.config.as_deref(), &args.overrides())?;
            tracing::info!(?config, "starting rollout");
            let mut env = AntTruncatedObsEnv::new(config.render_mode)?;
            let summary = run(&mut env, &config)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Info => {
            let env = AntTruncatedObsEnv::new(None)?;
            println!("{}", serde_json::to_string_pretty(&describe(&env, &METADATA))?);
        }
    }
    Ok(())
}
