/// Data layer: core types, ingestion, and the view computations.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  recode   │  rename headers, apply code maps → working Table
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │  filter   │  │  stats    │  │  chart    │
///   └──────────┘  └──────────┘  └──────────┘
///     subset +       describe,     aggregated
///     count/mean/    boxplot       series per
///     median         summaries     chart kind
/// ```

pub mod chart;
pub mod codemap;
pub mod filter;
pub mod loader;
pub mod model;
pub mod recode;
pub mod stats;
