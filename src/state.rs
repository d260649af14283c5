use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::filter::{self, Selection};
use crate::data::loader;
use crate::data::model::BusinessRegistry;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the bottom panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BottomView {
    /// Table of the filtered records.
    #[default]
    Records,
    /// Bar chart of category counts for the selected region.
    Categories,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded registry (None until a file is loaded).
    pub registry: Option<BusinessRegistry>,

    /// Path the registry was loaded from, for Reload.
    pub source_path: Option<PathBuf>,

    /// Current region/category dropdown choices.
    pub selection: Selection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Subset of `visible_indices` carrying coordinates; only these reach
    /// the map.
    pub mappable_indices: Vec<usize>,

    /// Stable per-category colours for the bar chart.
    pub category_colors: Option<ColorMap>,

    /// Active bottom-panel view.
    pub bottom_view: BottomView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Set when the map view should re-center on the current subset.
    pub reset_map_view: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            registry: None,
            source_path: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            mappable_indices: Vec::new(),
            category_colors: None,
            bottom_view: BottomView::default(),
            status_message: None,
            reset_map_view: false,
        }
    }
}

impl AppState {
    /// Load a registry file and ingest it, surfacing failures as a status
    /// message.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(registry) => {
                log::info!(
                    "Loaded {} records from {} ({} regions)",
                    registry.len(),
                    path.display(),
                    registry.regions.len()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_registry(registry);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the registry from its source file.
    pub fn reload(&mut self) {
        if let Some(path) = self.source_path.clone() {
            self.load_from(&path);
        }
    }

    /// Ingest a newly loaded registry, keeping the current selection when it
    /// is still valid, otherwise falling back to the first available values.
    pub fn set_registry(&mut self, registry: BusinessRegistry) {
        let region = self
            .selection
            .region
            .take()
            .filter(|r| registry.regions.contains(r))
            .or_else(|| registry.regions.first().cloned());

        let category = match (&region, self.selection.category.take()) {
            (Some(r), Some(c)) if registry.categories_in(r).any(|x| *x == c) => Some(c),
            (Some(r), _) => registry.first_category_in(r),
            (None, _) => None,
        };

        self.selection = Selection { region, category };
        self.category_colors = Some(ColorMap::new(&registry.all_categories()));
        self.registry = Some(registry);
        self.status_message = None;
        self.reset_map_view = true;
        self.refilter();
    }

    /// Recompute the cached index sets after a filter change.
    pub fn refilter(&mut self) {
        match &self.registry {
            Some(registry) => {
                self.visible_indices = filter::filtered_indices(registry, &self.selection);
                self.mappable_indices = filter::mappable_indices(registry, &self.visible_indices);
            }
            None => {
                self.visible_indices.clear();
                self.mappable_indices.clear();
            }
        }
    }

    /// Select a region; the category resets to the first one available there.
    pub fn select_region(&mut self, region: String) {
        self.selection.category = self
            .registry
            .as_ref()
            .and_then(|r| r.first_category_in(&region));
        self.selection.region = Some(region);
        self.reset_map_view = true;
        self.refilter();
    }

    /// Select a category within the current region.
    pub fn select_category(&mut self, category: String) {
        self.selection.category = Some(category);
        self.reset_map_view = true;
        self.refilter();
    }

    /// Filtered rows that were dropped from the map for lacking coordinates.
    pub fn unmapped_count(&self) -> usize {
        self.visible_indices.len() - self.mappable_indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use pretty_assertions::assert_eq;

    fn record(region: &str, category: &str) -> Record {
        Record {
            region: region.to_string(),
            category: category.to_string(),
            business_name: "Shop".to_string(),
            representative: "Kim".to_string(),
            product: "Goods".to_string(),
            latitude: Some(37.5),
            longitude: Some(127.0),
        }
    }

    fn registry() -> BusinessRegistry {
        BusinessRegistry::from_records(vec![
            record("Seoul", "Retail"),
            record("Seoul", "Food"),
            record("Busan", "Logistics"),
        ])
    }

    #[test]
    fn ingest_defaults_to_first_region_and_category() {
        let mut state = AppState::default();
        state.set_registry(registry());

        assert_eq!(state.selection.region.as_deref(), Some("Busan"));
        assert_eq!(state.selection.category.as_deref(), Some("Logistics"));
        assert_eq!(state.visible_indices, vec![2]);
    }

    #[test]
    fn region_change_resets_category_to_first_available() {
        let mut state = AppState::default();
        state.set_registry(registry());

        state.select_region("Seoul".to_string());
        assert_eq!(state.selection.category.as_deref(), Some("Food"));
        assert_eq!(state.visible_indices, vec![1]);

        state.select_category("Retail".to_string());
        assert_eq!(state.visible_indices, vec![0]);
    }

    #[test]
    fn reload_keeps_a_still_valid_selection() {
        let mut state = AppState::default();
        state.set_registry(registry());
        state.select_region("Seoul".to_string());
        state.select_category("Retail".to_string());

        state.set_registry(registry());
        assert_eq!(state.selection.region.as_deref(), Some("Seoul"));
        assert_eq!(state.selection.category.as_deref(), Some("Retail"));
    }

    #[test]
    fn rows_without_coordinates_stay_in_the_table_but_off_the_map() {
        let mut records = registry().records;
        records.push(Record {
            latitude: None,
            ..record("Busan", "Logistics")
        });
        let mut state = AppState::default();
        state.set_registry(BusinessRegistry::from_records(records));

        assert_eq!(state.visible_indices.len(), 2);
        assert_eq!(state.mappable_indices.len(), 1);
        assert_eq!(state.unmapped_count(), 1);
    }
}
