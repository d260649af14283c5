use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::data::filter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Category bar chart (bottom panel)
// ---------------------------------------------------------------------------

/// Bar chart of per-category record counts for the selected region.
/// Independent of the category dropdown: the whole region is aggregated.
pub fn category_chart(ui: &mut Ui, state: &AppState) {
    let Some(registry) = &state.registry else {
        ui.label("No registry loaded.");
        return;
    };
    let Some(region) = state.selection.region.as_deref() else {
        ui.label("No region selected.");
        return;
    };

    let counts = filter::category_counts(registry, region);
    if counts.is_empty() {
        ui.label(format!("No records in {region}."));
        return;
    }

    let categories: Vec<String> = counts.keys().cloned().collect();
    let bars: Vec<Bar> = counts
        .values()
        .enumerate()
        .map(|(i, &count)| {
            let category = &categories[i];
            let color = state
                .category_colors
                .as_ref()
                .map(|cm| cm.color_for(category))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, count as f64)
                .width(0.7)
                .name(category)
                .fill(color)
        })
        .collect();

    let labels = categories;
    Plot::new("category_chart")
        .y_axis_label("Businesses")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid([false, true])
        .x_axis_formatter(move |mark, _range| {
            if mark.value < -0.5 {
                return String::new();
            }
            let i = mark.value.round() as usize;
            if (mark.value - i as f64).abs() < 1e-6 {
                labels.get(i).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
