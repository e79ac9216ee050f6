use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::analysis::curve::{DEFAULT_MARGIN, DEFAULT_RESOLUTION};
use crate::analysis::AnalysisConfig;
use crate::chart::DEFAULT_STROKE_WIDTH;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "BELL_PLOT_CONFIG";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// User-tunable settings. Every field is optional in the file.
///
/// ```json
/// { "margin": 3.0, "resolution": 100, "stroke_width": 2, "window_size": [1200, 800] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Padding added on each side of the pooled sample range.
    pub margin: f64,
    /// Points per curve; values below 2 are raised to 2.
    pub resolution: usize,
    pub stroke_width: u32,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            resolution: DEFAULT_RESOLUTION,
            stroke_width: DEFAULT_STROKE_WIDTH,
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Read the file named by [`CONFIG_ENV`], or fall back to defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn analysis(&self) -> AnalysisConfig {
        AnalysisConfig {
            margin: self.margin,
            resolution: self.resolution.max(2),
        }
    }
}
