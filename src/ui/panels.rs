use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – paste box and statistics
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Paste data");
    ui.label("Copy cells from a spreadsheet, header row first.");
    ui.add(
        TextEdit::multiline(&mut state.paste_buffer)
            .hint_text("A\tB\n1\t10\n2\t20")
            .font(egui::TextStyle::Monospace)
            .desired_rows(8)
            .desired_width(f32::INFINITY),
    );

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Paste").clicked() {
            paste_from_clipboard(state);
        }
        if ui.button("Process").clicked() {
            state.submit_pasted_text();
        }
        if ui.button("Clear").clicked() {
            state.paste_buffer.clear();
        }
    });

    ui.separator();
    ui.heading("Statistics");

    let Some(analysis) = &state.analysis else {
        ui.label("No data loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for ((line, series), stats) in analysis
                .summaries()
                .iter()
                .zip(&analysis.series)
                .zip(&analysis.stats)
            {
                let mut text = RichText::new(line).color(series.color.rgb);
                if stats.is_degenerate() {
                    text = text.italics();
                }
                ui.label(text);
            }

            let degenerate = analysis.stats.iter().filter(|s| s.is_degenerate()).count();
            if degenerate > 0 {
                ui.label(
                    RichText::new(format!(
                        "{degenerate} column(s) have no spread or no numbers and cannot be drawn"
                    ))
                    .color(Color32::YELLOW),
                );
            }

            ui.add_space(6.0);
            egui::CollapsingHeader::new(RichText::new("Details").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .vscroll(false)
                        .column(TableColumn::auto())
                        .columns(TableColumn::auto().at_least(48.0), 3)
                        .header(18.0, |mut header| {
                            for title in ["Column", "n", "Min", "Max"] {
                                header.col(|ui: &mut Ui| {
                                    ui.strong(title);
                                });
                            }
                        })
                        .body(|mut body| {
                            for (col, stats) in analysis.columns.iter().zip(&analysis.stats) {
                                body.row(18.0, |mut row| {
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format!("{}. {}", col.index + 1, col.label));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(stats.count.to_string());
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format_bound(stats.min));
                                    });
                                    row.col(|ui: &mut Ui| {
                                        ui.label(format_bound(stats.max));
                                    });
                                });
                            }
                        });
                });
        });
}

fn format_bound(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "–".to_string()
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_chart = state.chart.current().is_some();
            if ui
                .add_enabled(has_chart, egui::Button::new("Export chart…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(analysis) = &state.analysis {
            ui.label(format!(
                "{}: {} column(s)",
                analysis.source,
                analysis.columns.len()
            ));
            if let (Some(start), Some(end)) = (analysis.domain.start(), analysis.domain.end()) {
                ui.separator();
                ui.label(format!("x from {} to {}", format_bound(start), format_bound(end)));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs and clipboard
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open table")
        .add_filter("Supported files", &["csv", "tsv", "tab", "txt", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv", "tab", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();

    if let Some(path) = file {
        state.export_chart(&path);
    }
}

fn paste_from_clipboard(state: &mut AppState) {
    match arboard::Clipboard::new().and_then(|mut cb| cb.get_text()) {
        Ok(text) => state.paste_buffer = text,
        Err(e) => {
            log::warn!("Clipboard unavailable: {e}");
            state.status_message = Some(format!("Clipboard: {e}"));
        }
    }
}
