use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Record – one row of the business registry
// ---------------------------------------------------------------------------

/// A single business-registry entry (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Top-level administrative region (광역).
    pub region: String,
    /// Industry category (업종, standard industry classification).
    pub category: String,
    pub business_name: String,
    pub representative: String,
    /// Main product description.
    pub product: String,
    /// Missing or non-finite coordinates are stored as `None`.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record {
    /// The `(latitude, longitude)` pair, if both are present and finite.
    /// Rows without a coordinate are excluded from the map.
    pub fn coordinate(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// BusinessRegistry – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed registry with pre-computed region/category indices.
#[derive(Debug, Clone, Default)]
pub struct BusinessRegistry {
    /// All records (rows), in file order.
    pub records: Vec<Record>,
    /// Sorted unique region values present in the table.
    pub regions: Vec<String>,
    /// For each region the sorted set of categories present in it.
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl BusinessRegistry {
    /// Build the region/category indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for rec in &records {
            categories
                .entry(rec.region.clone())
                .or_default()
                .insert(rec.category.clone());
        }
        let regions: Vec<String> = categories.keys().cloned().collect();
        BusinessRegistry {
            records,
            regions,
            categories,
        }
    }

    /// Categories present in the given region, sorted.
    pub fn categories_in(&self, region: &str) -> impl Iterator<Item = &String> {
        self.categories.get(region).into_iter().flatten()
    }

    /// First (alphabetically) category in the given region, the dropdown default.
    pub fn first_category_in(&self, region: &str) -> Option<String> {
        self.categories
            .get(region)
            .and_then(|set| set.iter().next().cloned())
    }

    /// Sorted set of every category in the table, across all regions.
    pub fn all_categories(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.category.clone()).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
