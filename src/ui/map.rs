use eframe::egui::{Color32, Ui};
use egui_plot::{Plot, PlotBounds, Points};

use crate::data::filter;
use crate::data::model::BusinessRegistry;
use crate::state::AppState;

/// Markers are fixed-size translucent red dots.
const MARKER_RADIUS: f32 = 4.0;

/// Minimum half-span of the map view in degrees (roughly a city block's
/// worth of margin around a single marker).
const MIN_HALF_SPAN: f64 = 0.01;

// ---------------------------------------------------------------------------
// Registry map (central panel)
// ---------------------------------------------------------------------------

/// Render the filtered records as fixed-size markers, centered on their mean
/// coordinate. Hovering a marker shows the business and representative name.
pub fn registry_map(ui: &mut Ui, state: &mut AppState) {
    let Some(registry) = &state.registry else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a registry file to view the map  (File → Open…)");
        });
        return;
    };

    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records match the current selection.");
        });
        return;
    }
    if state.mappable_indices.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No records in the current selection carry coordinates.");
        });
        return;
    }

    if let (Some(region), Some(category)) =
        (&state.selection.region, &state.selection.category)
    {
        ui.heading(format!("{category} businesses in {region}"));
    }

    let center = filter::map_center(registry, &state.mappable_indices);
    let reset_view = std::mem::take(&mut state.reset_map_view);

    Plot::new("registry_map")
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Re-center on load or selection change only, so the user can
            // still pan and zoom afterwards.
            if reset_view {
                if let Some((lat, lon)) = center {
                    let (half_lat, half_lon) =
                        half_spans(registry, &state.mappable_indices, lat, lon);
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [lon - half_lon, lat - half_lat],
                        [lon + half_lon, lat + half_lat],
                    ));
                }
            }

            for &idx in &state.mappable_indices {
                let rec = &registry.records[idx];
                let Some((lat, lon)) = rec.coordinate() else {
                    continue;
                };
                plot_ui.points(
                    Points::new(vec![[lon, lat]])
                        .radius(MARKER_RADIUS)
                        .color(Color32::from_rgba_unmultiplied(255, 0, 0, 160))
                        .name(format!("{} ({})", rec.business_name, rec.representative)),
                );
            }
        });
}

/// Half-spans symmetric about the mean, so the mean coordinate is the visual
/// center of the view.
fn half_spans(
    registry: &BusinessRegistry,
    indices: &[usize],
    center_lat: f64,
    center_lon: f64,
) -> (f64, f64) {
    let mut half_lat: f64 = 0.0;
    let mut half_lon: f64 = 0.0;
    for &idx in indices {
        if let Some((lat, lon)) = registry.records[idx].coordinate() {
            half_lat = half_lat.max((lat - center_lat).abs());
            half_lon = half_lon.max((lon - center_lon).abs());
        }
    }
    (
        (half_lat * 1.1).max(MIN_HALF_SPAN),
        (half_lon * 1.1).max(MIN_HALF_SPAN),
    )
}
