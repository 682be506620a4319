use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use warming_growth::{pipeline, Config};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) configure paths ──────────────────────────────────────────
    let cfg = Config::from_env().context("loading config")?;
    info!(input = %cfg.input.display(), output = %cfg.output_dir.display(), "configured");

    // ─── 3) load, transform, render, move into place ─────────────────
    let written = pipeline::run_all(&cfg)?;

    info!("done, {} files written", written.len());
    Ok(())
}
