/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BusinessRegistry
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ BusinessRegistry│  Vec<Record>, region/category index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  region + category selection → filtered indices
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
