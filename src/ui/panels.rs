use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{AppState, BottomView};
use crate::ui::{chart, table};

// ---------------------------------------------------------------------------
// Left side panel – region / category dropdowns
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the combo closures.
    let (regions, categories) = match &state.registry {
        Some(registry) => {
            let current_region = state.selection.region.clone().unwrap_or_default();
            let categories: Vec<String> =
                registry.categories_in(&current_region).cloned().collect();
            (registry.regions.clone(), categories)
        }
        None => {
            ui.label("No registry loaded.");
            return;
        }
    };

    let current_region = state.selection.region.clone().unwrap_or_default();
    ui.strong("Region");
    egui::ComboBox::from_id_salt("region_select")
        .width(ui.available_width())
        .selected_text(&current_region)
        .show_ui(ui, |ui: &mut Ui| {
            for region in &regions {
                if ui
                    .selectable_label(current_region == *region, region)
                    .clicked()
                {
                    state.select_region(region.clone());
                }
            }
        });

    ui.add_space(8.0);

    let current_category = state.selection.category.clone().unwrap_or_default();
    ui.strong("Industry category");
    egui::ComboBox::from_id_salt("category_select")
        .width(ui.available_width())
        .selected_text(&current_category)
        .show_ui(ui, |ui: &mut Ui| {
            for category in &categories {
                if ui
                    .selectable_label(current_category == *category, category)
                    .clicked()
                {
                    state.select_category(category.clone());
                }
            }
        });

    ui.separator();

    // ---- Selection summary ----
    ui.label(format!("{} matching records", state.visible_indices.len()));
    ui.label(format!("{} with coordinates", state.mappable_indices.len()));
    let unmapped = state.unmapped_count();
    if unmapped > 0 {
        ui.label(
            RichText::new(format!("{unmapped} without coordinates (not mapped)"))
                .color(Color32::YELLOW),
        );
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
        });

        if ui
            .add_enabled(state.source_path.is_some(), egui::Button::new("⟳ Reload"))
            .clicked()
        {
            state.reload();
        }

        ui.separator();

        if let Some(registry) = &state.registry {
            ui.label(format!(
                "{} records loaded, {} shown",
                registry.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – record table / category chart
// ---------------------------------------------------------------------------

/// Render the bottom detail panel with its view switcher.
pub fn bottom_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.bottom_view, BottomView::Records, "Records");
        ui.selectable_value(&mut state.bottom_view, BottomView::Categories, "Categories");
    });
    ui.separator();

    match state.bottom_view {
        BottomView::Records => table::record_table(ui, state),
        BottomView::Categories => chart::category_chart(ui, state),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open business registry")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}
