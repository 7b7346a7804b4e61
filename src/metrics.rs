//! Metrics Calculator: derives the four business indicators from a dataset.

use crate::error::DiagnosticError;
use crate::model::{Indicators, Record};

/// Computes the indicator snapshot for a dataset.
///
/// Fails with [`DiagnosticError::EmptyDataset`] when there is no data row
/// and with [`DiagnosticError::DivisionByZero`] when the summed revenue is
/// zero, so the margin percentage is never a silent NaN or infinity.
pub fn compute(dataset: &[Record]) -> Result<Indicators, DiagnosticError> {
    if dataset.is_empty() {
        return Err(DiagnosticError::EmptyDataset);
    }

    let total_revenue: f64 = dataset.iter().map(|record| record.revenue).sum();
    let total_cost: f64 = dataset.iter().map(|record| record.cost).sum();
    if total_revenue == 0.0 {
        return Err(DiagnosticError::DivisionByZero);
    }

    let margin_amount = total_revenue - total_cost;
    let margin_percentage = margin_amount / total_revenue * 100.0;
    let average_rating =
        dataset.iter().map(|record| record.rating).sum::<f64>() / dataset.len() as f64;

    Ok(Indicators {
        total_revenue,
        total_cost,
        margin_amount,
        margin_percentage,
        average_rating,
    })
}
