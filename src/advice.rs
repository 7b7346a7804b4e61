//! Recommendation Engine: maps indicators to canned advisory strings.

use crate::model::Indicators;

/// Advice appended when the margin percentage falls below
/// [`MARGIN_THRESHOLD`].
pub const MARGIN_ADVICE: &str =
    "Votre marge est faible. Envisagez de réduire les coûts ou d'augmenter les prix.";

/// Advice appended when the average rating falls below
/// [`RATING_THRESHOLD`].
pub const RATING_ADVICE: &str =
    "Les avis clients sont faibles. Travaillez sur la qualité ou le service client.";

pub const MARGIN_THRESHOLD: f64 = 20.0;
pub const RATING_THRESHOLD: f64 = 4.0;

/// Pure function of the indicators. The margin check always runs before
/// the rating check, so the returned order is fixed.
pub fn recommendations(indicators: &Indicators) -> Vec<String> {
    let mut advice = Vec::new();
    if indicators.margin_percentage < MARGIN_THRESHOLD {
        advice.push(MARGIN_ADVICE.to_string());
    }
    if indicators.average_rating < RATING_THRESHOLD {
        advice.push(RATING_ADVICE.to_string());
    }
    advice
}
