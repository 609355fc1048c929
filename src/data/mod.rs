/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  data/remote_worker_productivity_1000_final.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WorkerTable (memoized, read once)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  industry selection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  frequency tables, (x, y) series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
