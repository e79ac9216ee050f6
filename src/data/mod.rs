/// Data layer: raw tables, loading, and column sampling.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet      pasted text
///        │                                │
///        ▼                                ▼
///   ┌──────────────────────────────────────────┐
///   │  loader   │  source → RawTable (headers, Cell grid)
///   └──────────────────────────────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ sampler  │  RawTable → Vec<Column> (finite samples only)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod sampler;

use thiserror::Error;

/// Failures that are specific to turning a source into a [`model::RawTable`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("the source has no header row")]
    MissingHeader,
    #[error("malformed JSON table: {0}")]
    MalformedJson(String),
}
