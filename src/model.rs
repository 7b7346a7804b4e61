//! Data structures describing the diagnostic pipeline's inputs and outputs.

/// One input row: a single product's performance at a store.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub store: String,
    pub product: String,
    /// Revenue generated by the product, in euros.
    pub revenue: f64,
    /// Cost associated with selling the product, in euros.
    pub cost: f64,
    /// Number of customers or completed sales.
    pub customers: u32,
    /// Average customer rating, expected within `[1, 5]`.
    pub rating: f64,
}

/// Ordered collection of records. The order is irrelevant to every
/// computation but preserved for display.
pub type Dataset = Vec<Record>;

/// The four derived business indicators, computed once per dataset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indicators {
    pub total_revenue: f64,
    pub total_cost: f64,
    /// `total_revenue - total_cost`.
    pub margin_amount: f64,
    /// `margin_amount / total_revenue * 100`.
    pub margin_percentage: f64,
    /// Arithmetic mean of the per-record ratings.
    pub average_rating: f64,
}

/// Supported upload formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Xlsx,
}

impl InputFormat {
    /// Guesses the format from an uploaded file name, the way the upload
    /// control distinguishes `.csv` from `.xlsx`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else if lower.ends_with(".xlsx") {
            Some(Self::Xlsx)
        } else {
            None
        }
    }
}

/// Everything the display surface needs after one pipeline invocation:
/// the parsed dataset for the preview table, the indicators and
/// recommendations for on-screen display, and the finished PDF bytes for
/// the download button.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub dataset: Dataset,
    pub indicators: Indicators,
    pub recommendations: Vec<String>,
    pub report: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::InputFormat;

    #[test]
    fn format_from_file_name() {
        assert_eq!(
            InputFormat::from_file_name("donnees.csv"),
            Some(InputFormat::Csv)
        );
        assert_eq!(
            InputFormat::from_file_name("Exemple_PME.XLSX"),
            Some(InputFormat::Xlsx)
        );
        assert_eq!(InputFormat::from_file_name("notes.txt"), None);
    }
}
