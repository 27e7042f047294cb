// traffic-insight: query traffic for a location and print the screen or JSON.
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use traffic_ai::{AiConfig, TrafficAdapter};
use traffic_ui::shell::render::render_screen;
use traffic_ui::{MapViewport, SearchController};

#[derive(Parser, Debug)]
#[command(
    name = "traffic-insight",
    version,
    about = "Ask a generative-AI model for the traffic congestion around a location"
)]
struct Args {
    /// Location to analyze, e.g. "Bengaluru, India". Reads one per line from stdin if omitted.
    location: Option<String>,

    /// JSON config file (api_key, model, base_url). Defaults to the environment.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model identifier, overrides config and environment
    #[arg(long)]
    model: Option<String>,

    /// Print the query result as JSON instead of the text screen
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::from_env(),
    };
    if let Some(model) = args.model.clone() {
        config.model = model;
    }
    tracing::info!(
        model = %config.model,
        live = config.has_credential(),
        "traffic insight starting"
    );

    let controller = SearchController::new(TrafficAdapter::from_config(config));
    let mut viewport = MapViewport::default();

    match &args.location {
        Some(location) => {
            run_once(&controller, &mut viewport, location, args.json).await?;
        }
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("read location from stdin")?;
                run_once(&controller, &mut viewport, &line, args.json).await?;
            }
        }
    }

    Ok(())
}

async fn run_once(
    controller: &SearchController,
    viewport: &mut MapViewport,
    location: &str,
    json: bool,
) -> Result<()> {
    if !controller.submit(location).await {
        tracing::debug!("skipping blank location");
        return Ok(());
    }

    let state = controller.snapshot();
    if let Some(result) = &state.result {
        viewport.follow(&result.assessment);
    }

    let mut stdout = io::stdout().lock();
    if json {
        let text = match &state.result {
            Some(result) => serde_json::to_string_pretty(result),
            None => serde_json::to_string_pretty(&state),
        }
        .context("serialize query result")?;
        writeln!(stdout, "{text}")?;
    } else {
        write!(stdout, "{}", render_screen(&state, *viewport))?;
        writeln!(stdout)?;
    }
    stdout.flush().context("flush stdout")?;
    Ok(())
}
