use std::path::Path;

use crate::analysis::Analysis;
use crate::chart::{ChartData, ChartSlot};
use crate::config::AppConfig;
use crate::data::loader::{load_file, parse_clipboard_text};
use crate::data::model::RawTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub config: AppConfig,

    /// Result of the latest submission (None until something is loaded).
    pub analysis: Option<Analysis>,

    /// The chart currently shown in the central panel.
    pub chart: ChartSlot,

    /// Contents of the paste box.
    pub paste_buffer: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Run the pipeline on a freshly extracted table and replace everything
    /// derived from the previous submission.
    pub fn submit(&mut self, table: RawTable) {
        log::info!(
            "Submitting {} column(s), {} row(s) from {}",
            table.num_columns(),
            table.num_rows(),
            table.source
        );
        let analysis = Analysis::run(&table, &self.config.analysis());
        self.chart
            .replace(ChartData::from_analysis(&analysis, self.config.stroke_width));
        self.analysis = Some(analysis);
        self.status_message = None;
    }

    /// Process the paste box. Blank text leaves the current chart untouched.
    pub fn submit_pasted_text(&mut self) {
        match parse_clipboard_text(&self.paste_buffer) {
            Some(table) => self.submit(table),
            None => log::debug!("Paste box is empty, nothing to process"),
        }
    }

    pub fn load_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(table) => self.submit(table),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    pub fn export_chart(&mut self, path: &Path) {
        let Some(chart) = self.chart.current() else {
            return;
        };
        match chart.data.export_json(path) {
            Ok(()) => {
                log::info!("Exported chart to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
