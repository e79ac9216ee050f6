use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Color32;
use serde::Serialize;

use crate::analysis::Analysis;

pub const DEFAULT_STROKE_WIDTH: u32 = 2;

// ---------------------------------------------------------------------------
// Presenter contract
// ---------------------------------------------------------------------------

/// One line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// Densities aligned to [`ChartData::labels`].
    pub data: Vec<f64>,
    pub color: String,
    pub stroke_width: u32,
    pub filled: bool,
    #[serde(skip)]
    pub rgb: Color32,
}

/// Everything the chart needs: the shared x-axis and one dataset per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<f64>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn from_analysis(analysis: &Analysis, stroke_width: u32) -> Self {
        ChartData {
            labels: analysis.domain.points.clone(),
            datasets: analysis
                .series
                .iter()
                .map(|s| Dataset {
                    label: s.label.clone(),
                    data: s.values.clone(),
                    color: s.color.css(),
                    stroke_width,
                    filled: false,
                    rgb: s.color.rgb,
                })
                .collect(),
        }
    }

    /// Write the chart as pretty-printed JSON.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, self).context("writing chart JSON")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ChartSlot – the single "current chart" handle
// ---------------------------------------------------------------------------

/// A chart that has been handed to the plot widget.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// Distinct per install so the plot widget starts from fresh bounds and
    /// does not carry zoom state over from the previous chart.
    pub generation: u64,
    pub data: ChartData,
}

/// Holds at most one rendered chart. Installing a new one always releases the
/// previous chart first; charts are never merged.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<RenderedChart>,
    generation: u64,
}

impl ChartSlot {
    /// Drop the current chart, if any. Returns the released chart.
    pub fn release(&mut self) -> Option<RenderedChart> {
        let released = self.current.take();
        if let Some(chart) = &released {
            log::debug!("Released chart generation {}", chart.generation);
        }
        released
    }

    /// Release whatever is shown, then install `data` as the new chart.
    pub fn replace(&mut self, data: ChartData) -> &RenderedChart {
        self.release();
        self.generation += 1;
        log::debug!(
            "Installing chart generation {} with {} datasets",
            self.generation,
            data.datasets.len()
        );
        self.current.insert(RenderedChart {
            generation: self.generation,
            data,
        })
    }

    pub fn current(&self) -> Option<&RenderedChart> {
        self.current.as_ref()
    }
}
