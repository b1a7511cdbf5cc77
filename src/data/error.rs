use thiserror::Error;

/// Domain validation failures raised while turning raw rows into a
/// [`LaunchTable`](super::model::LaunchTable).
///
/// I/O and parser failures stay as `anyhow` errors with context; these are
/// the cases where the file parsed fine but its content is not a launch table.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("row {row}: payload mass {value} is not a non-negative number")]
    InvalidPayload { row: usize, value: f64 },

    #[error("row {row}: outcome class {value} is neither 0 nor 1")]
    InvalidOutcome { row: usize, value: i64 },

    #[error("row {row}: column '{column}' holds {value}, expected a whole number")]
    NotAnInteger { row: usize, column: String, value: f64 },

    #[error("row {row}: column '{column}' is empty")]
    EmptyCell { row: usize, column: String },

    #[error("dataset contains no launch records")]
    EmptyTable,

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
