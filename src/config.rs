use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::error::{GrowthError, Result};
use crate::growth::DEFAULT_YEARS;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "GROWTH_CONFIG";

/// Where to read from, where to write to, and how to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub workbook: String,
    pub panel_numeric: String,
    pub panel_scenario: String,
    pub years: u32,
    pub image_width: u32,
    pub image_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/input/figure_data.txt"),
            output_dir: PathBuf::from("data/output"),
            workbook: "growth_rates.xlsx".into(),
            panel_numeric: "panel_plot.png".into(),
            panel_scenario: "panel_plot_scenario.png".into(),
            years: DEFAULT_YEARS,
            // 10x8 in at 150 dpi
            image_width: 1500,
            image_height: 1200,
        }
    }
}

impl Config {
    /// Defaults, overridden by the YAML file named in `GROWTH_CONFIG` if set.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!(path = %path.display(), "loading config");
                Self::from_yaml_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GrowthError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: Config =
            serde_yaml::from_str(text).map_err(|e| GrowthError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if self.years == 0 {
            return Err(GrowthError::Config("years must be positive".into()));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(GrowthError::Config("image size must be non-zero".into()));
        }
        for name in [&self.workbook, &self.panel_numeric, &self.panel_scenario] {
            if name.is_empty() {
                return Err(GrowthError::Config("output file names must be set".into()));
            }
        }
        Ok(())
    }

    pub fn workbook_path(&self) -> PathBuf {
        self.output_dir.join(&self.workbook)
    }

    pub fn panel_numeric_path(&self) -> PathBuf {
        self.output_dir.join(&self.panel_numeric)
    }

    pub fn panel_scenario_path(&self) -> PathBuf {
        self.output_dir.join(&self.panel_scenario)
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }
}
