// Bargain report entry point.
//
// 1. Initialize tracing (stderr, RUST_LOG-aware)
// 2. Load config from <base-dir>/config/bargain.toml, seeding from defaults/
//    (built-in settings when neither exists)
// 3. Apply command-line overrides
// 4. Parse, rank, and write the report

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use bargain_app::config::{self, Overrides};
use bargain_app::pipeline;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank players by cap dollars per even-strength point per 60")]
struct Cli {
    /// Directory holding config/ and defaults/; relative data paths resolve
    /// against it. Defaults to the current directory.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Player data file, overriding data_paths.input.
    #[arg(long)]
    input: Option<String>,

    /// Report destination, overriding data_paths.output.
    #[arg(long)]
    output: Option<String>,

    /// Team label for the report header.
    #[arg(long)]
    team: Option<String>,

    /// Season label for the report header.
    #[arg(long)]
    season: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let cli = Cli::parse();

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    let config = config::load_config(&base_dir)
        .context("failed to load configuration")?
        .with_overrides(Overrides {
            input: cli.input,
            output: cli.output,
            team: cli.team,
            season: cli.season,
        })
        .context("invalid command-line override")?;
    info!(
        "Config loaded: season={}, input={}, output={}",
        config.report.season,
        config.input_path().display(),
        config.output_path().display()
    );

    let summary = pipeline::run(&config)?;

    println!(
        "Ranked {} players for {}; report written to {}",
        summary.records,
        summary.team,
        summary.output_path.display()
    );
    println!("Top Bargain: {}", summary.top_bargain);
    println!("Most Overpaid: {}", summary.most_overpaid);
    Ok(())
}

/// Initialize tracing to stderr so stdout carries only the run summary.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bargain=info,bargain_app=info,bargain_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
