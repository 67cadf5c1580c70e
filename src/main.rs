mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use cropsim::config::Config;
use cropsim::logic::{rank_crops, Simulator};
use cropsim::models::{lookup_soil, EnvironmentReading};
use cropsim::report::{render_suitability, render_text};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command.unwrap_or(Commands::Run { json: false }) {
        Commands::Init => {
            let (_, path) = Config::setup_interactive().context("interactive setup failed")?;
            println!("Run `cropsim -c {} run` to simulate.", path.display());
        }
        Commands::Check => {
            let config = load_config(&cli.config)?;
            let today = chrono::Local::now().date_naive();
            let request = config.validate(today).context("invalid configuration")?;
            println!(
                "Configuration OK: {} on {} for {} days starting {}",
                request.crop, request.soil, request.days, request.start_date
            );
        }
        Commands::Run { json } => {
            let config = load_config(&cli.config)?;
            let today = chrono::Local::now().date_naive();
            let request = config
                .to_request(today)
                .context("failed to build simulation request")?;
            let simulator = Simulator::new(&request).context("invalid simulation request")?;
            let result = simulator
                .run_with_progress(|day| {
                    tracing::trace!(day = day.day, growth = day.growth_percentage, "progress")
                })
                .context("simulation failed")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_text(&result));
            }
        }
        Commands::Suitability { json } => {
            let config = load_config(&cli.config)?;
            let today = chrono::Local::now().date_naive();
            let request = config
                .to_request(today)
                .context("failed to build simulation request")?;
            let soil = lookup_soil(&request.soil).context("invalid soil type")?;
            let env = request
                .environment
                .unwrap_or_else(EnvironmentReading::fallback);
            let ranking = rank_crops(&env, soil.soil, request.management.farm_size_hectares)
                .context("failed to rank crops")?;

            if json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                print!("{}", render_suitability(&ranking));
            }
        }
    }

    Ok(())
}

fn load_config(path: &Option<std::path::PathBuf>) -> anyhow::Result<Config> {
    if !Config::exists(path.as_ref()) {
        anyhow::bail!(
            "No configuration found. Run `cropsim init` or copy config/cropsim.yaml.example to config/cropsim.yaml"
        );
    }
    Config::load(path.clone()).context("failed to load configuration")
}
