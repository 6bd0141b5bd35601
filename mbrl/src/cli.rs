//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rl::RenderMode;

use crate::config::{Overrides, Policy};

#[derive(Parser, Debug)]
#[command(name = "mbrl", version, about = "Roll out and inspect the ant locomotion environment")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run episodes and print a JSON summary.
    Rollout(RolloutArgs),
    /// Print spaces, step duration and model counts as JSON.
    Info,
}

#[derive(Args, Debug, Default)]
pub struct RolloutArgs {
    /// JSON rollout config; flags below override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub episodes: Option<usize>,

    /// Steps after which an episode is cut short.
    #[arg(long)]
    pub max_steps: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// One of human, rgb_array, depth_array.
    #[arg(long, value_parser = parse_render_mode)]
    pub render_mode: Option<RenderMode>,
}

impl RolloutArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            episodes: self.episodes,
            max_steps: self.max_steps,
            seed: self.seed,
            policy: self.policy,
            render_mode: self.render_mode,
        }
    }
}

fn parse_render_mode(s: &str) -> Result<RenderMode, String> {
    s.parse::<RenderMode>().map_err(|e| e.to_string())
}

/// Log level for a `-v` count.
pub fn level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rollout_flags_parse() {
        let cli = Cli::try_parse_from([
            "mbrl", "-vv", "rollout", "--episodes", "3", "--policy", "zero", "--render-mode", "rgb_array",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Rollout(args) = cli.command else {
            panic!("expected rollout");
        };
        assert_eq!(
            args.overrides(),
            Overrides {
                episodes: Some(3),
                policy: Some(Policy::Zero),
                render_mode: Some(RenderMode::RgbArray),
                ..Overrides::default()
            }
        );
    }

    #[test]
    fn unknown_render_mode_rejected() {
        assert!(Cli::try_parse_from(["mbrl", "rollout", "--render-mode", "window"]).is_err());
    }
}
