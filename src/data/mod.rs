/// Data layer: record model, loading, filtering, aggregation, pagination.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RecordStore   │  Vec<VehicleRecord>, facet sets (years, makes)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply year/make predicates → visible indices
///   └──────────┘
///        │
///        ├───────────────┐
///        ▼               ▼
///   ┌───────────┐   ┌──────────┐
///   │ aggregate  │   │  page     │  stats, distributions / table slices
///   └───────────┘   └──────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod page;
