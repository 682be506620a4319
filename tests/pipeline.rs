use anyhow::Result;
use calamine::{open_workbook, Data, Reader, Xlsx};
use ndarray::Array3;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use warming_growth::{
    data::{format_figure_data, TABLE_SHAPE},
    pipeline, Config, GrowthError, RawTable,
};

fn config_in(dir: &Path, raw: &RawTable) -> Result<Config> {
    let input = dir.join("figure_data.txt");
    fs::write(&input, format_figure_data(raw))?;
    Ok(Config {
        input,
        output_dir: dir.join("output"),
        ..Config::default()
    })
}

fn output_files(cfg: &Config) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(&cfg.output_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

#[test]
fn all_ones_input_gives_zero_sheets_and_both_panels() -> Result<()> {
    let dir = tempdir()?;
    let raw = RawTable::from_array(Array3::ones(TABLE_SHAPE))?;
    let cfg = config_in(dir.path(), &raw)?;

    let written = pipeline::run_all(&cfg)?;
    assert_eq!(written.len(), 3);
    assert_eq!(
        output_files(&cfg),
        vec!["growth_rates.xlsx", "panel_plot.png", "panel_plot_scenario.png"]
    );
    for png in [cfg.panel_numeric_path(), cfg.panel_scenario_path()] {
        let bytes = fs::read(&png)?;
        assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", png.display());
    }

    let mut book: Xlsx<_> = open_workbook(cfg.workbook_path())?;
    let sheets = book.sheet_names();
    assert_eq!(sheets.len(), 4);
    for sheet in sheets {
        let range = book.worksheet_range(&sheet)?;
        for row in 1..=6u32 {
            for col in 1..=5u32 {
                match range.get_value((row, col)) {
                    Some(Data::Float(v)) => assert_eq!(*v, 0.0),
                    Some(Data::Int(v)) => assert_eq!(*v, 0),
                    other => panic!("{sheet} ({row},{col}): {other:?}"),
                }
            }
        }
    }
    Ok(())
}

#[test]
fn numeric_panel_alone() -> Result<()> {
    let dir = tempdir()?;
    let raw = RawTable::from_array(Array3::from_shape_fn(TABLE_SHAPE, |(g, r, c)| {
        (1.0 + 0.01 * r as f64).powi(80) * (1.0 - 0.02 * c as f64) * (g + 1) as f64
    }))?;
    let cfg = config_in(dir.path(), &raw)?;

    let path = pipeline::run_numeric_panel(&cfg)?;
    assert_eq!(path, cfg.panel_numeric_path());
    assert_eq!(output_files(&cfg), vec!["panel_plot.png"]);
    Ok(())
}

#[test]
fn zero_baseline_writes_nothing_and_keeps_old_outputs() -> Result<()> {
    let dir = tempdir()?;
    let raw = RawTable::from_array(Array3::from_shape_fn(TABLE_SHAPE, |(g, r, c)| {
        if g == 3 && r == 0 && c == 0 {
            0.0
        } else {
            1.0
        }
    }))?;
    let cfg = config_in(dir.path(), &raw)?;
    fs::create_dir_all(&cfg.output_dir)?;
    fs::write(cfg.workbook_path(), b"previous run")?;

    let err = pipeline::run_all(&cfg).unwrap_err();
    let cause = err
        .chain()
        .find_map(|e| e.downcast_ref::<GrowthError>())
        .expect("typed error in chain");
    assert!(matches!(cause, GrowthError::Value { .. }));

    assert_eq!(output_files(&cfg), vec!["growth_rates.xlsx"]);
    assert_eq!(fs::read(cfg.workbook_path())?, b"previous run");
    Ok(())
}

#[test]
fn missing_input_is_file_not_found() {
    let dir = tempdir().unwrap();
    let cfg = Config {
        input: dir.path().join("absent.txt"),
        output_dir: dir.path().join("output"),
        ..Config::default()
    };
    let err = pipeline::run_all(&cfg).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GrowthError>(),
        Some(GrowthError::FileNotFound { .. })
    ));
    assert!(!cfg.output_dir.exists());
}
