use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Record table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the descriptive columns of the filtered subset.
/// An empty subset still shows the header row.
pub fn record_table(ui: &mut Ui, state: &AppState) {
    let Some(registry) = &state.registry else {
        ui.label("No registry loaded.");
        return;
    };

    let indices = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Business", "Representative", "Region", "Category", "Product"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let rec = &registry.records[indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.business_name);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.representative);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.region);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.category);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.product);
                });
            });
        });
}
