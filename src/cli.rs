use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cropsim",
    version,
    about = "Crop growth, yield and sustainability simulator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to cropsim.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured simulation (default)
    Run {
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config without simulating
    Check,
    /// Rank every crop for the configured weather and soil
    Suitability {
        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_flags() {
        let cli = Cli::parse_from(["cropsim", "-vv", "-c", "field.yaml", "run", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("field.yaml")));
        assert!(matches!(cli.command, Some(Commands::Run { json: true })));
    }

    #[test]
    fn parses_suitability() {
        let cli = Cli::parse_from(["cropsim", "suitability"]);
        assert!(matches!(cli.command, Some(Commands::Suitability { json: false })));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["cropsim"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }
}
