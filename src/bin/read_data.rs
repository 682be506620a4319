// src/bin/read_data.rs
//
// Print the loaded tables and their growth rates.

use anyhow::{Context, Result};
use ndarray::ArrayView2;
use tracing_subscriber::{fmt, EnvFilter};
use warming_growth::{
    compute_growth_rates,
    data::{SCENARIO_LABELS, WARMING_LABELS},
    load_figure_data, Config, IncomeGroup,
};

fn print_table(title: &str, table: ArrayView2<'_, f64>, scale: f64) {
    println!("\n{}:", title);
    print!("{: <12}", "");
    for label in WARMING_LABELS {
        print!("{:>12}", label);
    }
    println!();
    for (label, row) in SCENARIO_LABELS.iter().zip(table.rows()) {
        print!("{: <12}", label);
        for v in row {
            print!("{:>12.5}", v * scale);
        }
        println!();
    }
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = Config::from_env().context("loading config")?;
    let raw = load_figure_data(&cfg.input)
        .with_context(|| format!("loading {}", cfg.input.display()))?;
    let rates = compute_growth_rates(&raw, cfg.years).context("computing growth rates")?;

    println!("Data shape: {:?}", raw.values().dim());
    println!(
        "Table names: {:?}",
        IncomeGroup::ALL.map(IncomeGroup::heading)
    );
    println!("Row labels: {:?}", SCENARIO_LABELS);
    println!("Column labels: {:?}", WARMING_LABELS);

    for group in IncomeGroup::ALL {
        print_table(&format!("{} (per-capita GDP)", group), raw.group(group), 1.0);
        print_table(
            &format!("{} (fractional annual growth rates)", group),
            rates.group(group),
            1.0,
        );
        print_table(
            &format!("{} (percent annual growth rates)", group),
            rates.group(group),
            100.0,
        );
    }
    Ok(())
}
