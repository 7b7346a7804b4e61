//! Error taxonomy for the diagnostic pipeline.
//!
//! Every stage reports failures through [`DiagnosticError`] and propagates
//! them unhandled with `?`. The orchestrator in [`crate::pipeline`] is the
//! single place that turns an error into a user-facing message.

use thiserror::Error;

/// Tagged error kinds raised by the diagnostic pipeline.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    /// The uploaded file is structurally unreadable or misses a required
    /// column.
    #[error("invalid input file: {0}")]
    Parse(String),

    /// A data row holds a value that cannot be coerced to the numeric type
    /// of its column. `row` is the 1-based data row index (the header row
    /// does not count).
    #[error("data row {row}: column '{column}' holds non-numeric value '{value}'")]
    MalformedRow {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// The dataset contains a header but no data rows.
    #[error("the dataset contains no data rows")]
    EmptyDataset,

    /// Total revenue is zero, so the margin percentage is undefined.
    #[error("total revenue is zero; the margin percentage is undefined")]
    DivisionByZero,

    /// The dataset contains no product to chart.
    #[error("no product to chart")]
    NoDataToChart,

    /// Chart rasterization or PDF assembly failed.
    #[error("rendering failed: {0}")]
    Render(String),
}

impl From<genpdf::error::Error> for DiagnosticError {
    fn from(err: genpdf::error::Error) -> Self {
        DiagnosticError::Render(err.to_string())
    }
}
