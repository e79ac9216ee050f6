use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Density plot (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn density_plot(ui: &mut Ui, state: &AppState) {
    let chart = match state.chart.current() {
        Some(chart) => chart,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file (File → Open…) or paste a table on the left");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("Normal distribution curves");
    });

    // Keyed by generation: a new chart gets fresh bounds and zoom state.
    Plot::new(("density_plot", chart.generation))
        .legend(Legend::default())
        .x_axis_label("Value")
        .y_axis_label("Probability density")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for ds in &chart.data.datasets {
                // Degenerate columns yield non-finite densities; skip those points.
                let points: PlotPoints = chart
                    .data
                    .labels
                    .iter()
                    .zip(&ds.data)
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                let line = Line::new(points)
                    .name(&ds.label)
                    .color(ds.rgb)
                    .width(ds.stroke_width as f32);

                plot_ui.line(line);
            }
        });
}
