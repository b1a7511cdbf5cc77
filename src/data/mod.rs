/// Data layer: core types, loading, and the two dashboard queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchTable (once, fatal on error)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, payload bounds, site index
///   └─────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌───────────┐        ┌──────────┐
///   │ aggregate  │        │  filter   │  site + payload predicates
///   └───────────┘        └──────────┘
///   outcome counts        scatter points
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
