use std::collections::BTreeMap;

use super::model::BusinessRegistry;

// ---------------------------------------------------------------------------
// Selection: the two dropdown choices driving the pipeline
// ---------------------------------------------------------------------------

/// The current region/category dropdown choices.
/// `None` means "no constraint" for that field; once a registry is loaded the
/// app always holds a concrete selection (first available value by default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub region: Option<String>,
    pub category: Option<String>,
}

/// Return indices of records matching the current selection.
///
/// Two sequential equality filters: region first, then category within the
/// region subset. Pure function of (registry, selection).
pub fn filtered_indices(registry: &BusinessRegistry, selection: &Selection) -> Vec<usize> {
    registry
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            selection.region.as_deref().map_or(true, |r| rec.region == r)
                && selection.category.as_deref().map_or(true, |c| rec.category == c)
        })
        .map(|(i, _)| i)
        .collect()
}

/// Restrict `indices` to records carrying a usable coordinate.
/// Rows with missing latitude or longitude never reach the map.
pub fn mappable_indices(registry: &BusinessRegistry, indices: &[usize]) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| registry.records[i].coordinate().is_some())
        .collect()
}

/// Arithmetic mean coordinate over exactly the given rows, used as the map
/// view center. `None` when no row carries a coordinate.
pub fn map_center(registry: &BusinessRegistry, indices: &[usize]) -> Option<(f64, f64)> {
    let mut n = 0usize;
    let mut lat_sum = 0.0;
    let mut lon_sum = 0.0;
    for &i in indices {
        if let Some((lat, lon)) = registry.records[i].coordinate() {
            lat_sum += lat;
            lon_sum += lon;
            n += 1;
        }
    }
    if n == 0 {
        return None;
    }
    Some((lat_sum / n as f64, lon_sum / n as f64))
}

/// Row count per category over the region-filtered subset.
///
/// Deliberately independent of the category selection: the bar chart shows
/// the whole region's category breakdown.
pub fn category_counts(registry: &BusinessRegistry, region: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for rec in &registry.records {
        if rec.region == region {
            *counts.entry(rec.category.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use pretty_assertions::assert_eq;

    fn record(region: &str, category: &str, lat: f64, lon: f64) -> Record {
        Record {
            region: region.to_string(),
            category: category.to_string(),
            business_name: format!("{region} {category}"),
            representative: "Kim".to_string(),
            product: "Goods".to_string(),
            latitude: Some(lat),
            longitude: Some(lon),
        }
    }

    fn sample_registry() -> BusinessRegistry {
        BusinessRegistry::from_records(vec![
            record("Seoul", "Food", 37.5, 127.0),
            record("Seoul", "Food", 37.6, 127.1),
            record("Busan", "Retail", 35.1, 129.0),
        ])
    }

    fn select(region: &str, category: &str) -> Selection {
        Selection {
            region: Some(region.to_string()),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn region_filter_only_keeps_matching_rows() {
        let registry = sample_registry();
        for region in &registry.regions {
            let selection = Selection {
                region: Some(region.clone()),
                category: None,
            };
            for i in filtered_indices(&registry, &selection) {
                assert_eq!(&registry.records[i].region, region);
            }
        }
    }

    #[test]
    fn category_filter_is_idempotent() {
        let registry = sample_registry();
        let selection = select("Seoul", "Food");
        let once = filtered_indices(&registry, &selection);

        // Filtering the already-filtered subset by the same category again
        // changes nothing.
        let narrowed = BusinessRegistry::from_records(
            once.iter()
                .map(|&i| registry.records[i].clone())
                .collect(),
        );
        let twice = filtered_indices(&narrowed, &selection);
        assert_eq!(twice.len(), once.len());
        for (a, &b) in twice.iter().zip(once.iter()) {
            assert_eq!(narrowed.records[*a], registry.records[b]);
        }
    }

    #[test]
    fn worked_example_seoul_food() {
        let registry = sample_registry();
        let indices = filtered_indices(&registry, &select("Seoul", "Food"));
        assert_eq!(indices, vec![0, 1]);

        let mappable = mappable_indices(&registry, &indices);
        let (lat, lon) = map_center(&registry, &mappable).unwrap();
        assert!((lat - 37.55).abs() < 1e-9);
        assert!((lon - 127.05).abs() < 1e-9);
    }

    #[test]
    fn empty_subset_has_no_map_center() {
        let registry = sample_registry();
        let indices = filtered_indices(&registry, &select("Seoul", "Retail"));
        assert!(indices.is_empty());
        assert_eq!(map_center(&registry, &indices), None);
    }

    #[test]
    fn rows_without_coordinates_are_dropped_before_the_mean() {
        let mut records = sample_registry().records;
        records.push(Record {
            latitude: None,
            ..record("Seoul", "Food", 0.0, 0.0)
        });
        let registry = BusinessRegistry::from_records(records);

        let indices = filtered_indices(&registry, &select("Seoul", "Food"));
        assert_eq!(indices.len(), 3);

        let mappable = mappable_indices(&registry, &indices);
        assert_eq!(mappable, vec![0, 1]);

        // The dropped row does not skew the center.
        let (lat, lon) = map_center(&registry, &indices).unwrap();
        assert!((lat - 37.55).abs() < 1e-9);
        assert!((lon - 127.05).abs() < 1e-9);
    }

    #[test]
    fn category_counts_ignore_the_category_selection() {
        let registry = sample_registry();
        let counts = category_counts(&registry, "Seoul");
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("Food"), Some(&2));
        assert_eq!(category_counts(&registry, "Busan").get("Retail"), Some(&1));
    }
}
