//! Pipeline Orchestrator: one uploaded file in, one finished analysis out.
//!
//! Single-threaded and stateless; every invocation is independent. All
//! stage errors propagate here with `?`, and [`user_message`] performs the
//! single translation into the message shown above the upload control.

use log::{debug, info};

use crate::error::DiagnosticError;
use crate::model::{Analysis, InputFormat};
use crate::{advice, chart, ingest, metrics, report};

/// Runs the full pipeline: parse, indicators, recommendations, chart, PDF.
pub fn run(bytes: &[u8], format: InputFormat) -> Result<Analysis, DiagnosticError> {
    let dataset = ingest::parse(bytes, format)?;
    let indicators = metrics::compute(&dataset)?;
    let recommendations = advice::recommendations(&indicators);
    debug!(
        "indicators ready: margin {:.2} %, average rating {:.1}",
        indicators.margin_percentage, indicators.average_rating
    );

    let chart_png = chart::render(&dataset)?;
    let report = report::compose(&dataset, &indicators, &recommendations, &chart_png)?;
    info!(
        "generated diagnostic report ({} bytes) for {} rows",
        report.len(),
        dataset.len()
    );

    Ok(Analysis {
        dataset,
        indicators,
        recommendations,
        report,
    })
}

/// The single user-facing error message, mirroring the upload banner.
pub fn user_message(error: &DiagnosticError) -> String {
    format!("Erreur lors du chargement du fichier : {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_names_the_cause() {
        let message = user_message(&DiagnosticError::EmptyDataset);
        assert!(message.starts_with("Erreur lors du chargement du fichier : "));
        assert!(message.contains("no data rows"));
    }
}
