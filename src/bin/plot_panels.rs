// src/bin/plot_panels.rs
//
// Only the numeric-label panel plot.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use warming_growth::{pipeline, Config};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = Config::from_env().context("loading config")?;
    let path = pipeline::run_numeric_panel(&cfg)?;
    info!("saved {}", path.display());
    Ok(())
}
