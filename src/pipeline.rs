use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::data::{load_figure_data, IncomeGroup};
use crate::export::write_growth_workbook;
use crate::growth::{compute_growth_rates, GrowthRateTable};
use crate::output::OutputSet;
use crate::plot::{render_panel_plot, LabelStyle, PanelAxes};

/// Load the configured input and annualize it.
pub fn load_growth_rates(cfg: &Config) -> Result<GrowthRateTable> {
    info!("reading data");
    let raw = load_figure_data(&cfg.input)
        .with_context(|| format!("loading {}", cfg.input.display()))?;
    let rates = compute_growth_rates(&raw, cfg.years).context("computing growth rates")?;
    Ok(rates)
}

/// Spreadsheet plus both panel variants. Nothing is replaced unless all three
/// render.
pub fn run_all(cfg: &Config) -> Result<Vec<PathBuf>> {
    let rates = load_growth_rates(cfg)?;
    let axes = PanelAxes::default();
    let mut outputs = OutputSet::new();

    info!("creating Excel file");
    outputs.stage(cfg.workbook_path(), |tmp| {
        write_growth_workbook(&rates, &IncomeGroup::ALL, tmp)
    })?;

    info!("creating panel plots");
    for (path, style) in [
        (cfg.panel_numeric_path(), LabelStyle::Numeric),
        (cfg.panel_scenario_path(), LabelStyle::Scenario),
    ] {
        outputs.stage(path, |tmp| {
            render_panel_plot(&rates, axes, style, tmp, cfg.image_size())
        })?;
    }

    outputs.commit()
}

/// Numeric-label panel only.
pub fn run_numeric_panel(cfg: &Config) -> Result<PathBuf> {
    let rates = load_growth_rates(cfg)?;
    let mut outputs = OutputSet::new();
    outputs.stage(cfg.panel_numeric_path(), |tmp| {
        render_panel_plot(
            &rates,
            PanelAxes::default(),
            LabelStyle::Numeric,
            tmp,
            cfg.image_size(),
        )
    })?;
    let mut written = outputs.commit()?;
    written
        .pop()
        .context("panel plot was not written")
}
