//! Blank spreadsheet template offered for download.

use rust_xlsxwriter::Workbook;

use crate::error::DiagnosticError;
use crate::ingest::REQUIRED_HEADERS;

/// Fixed download name of the template workbook.
pub const TEMPLATE_FILE_NAME: &str = "exemple_pme.xlsx";
/// MIME type the template is served with.
pub const TEMPLATE_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// Name of the single sheet in the template workbook.
pub const TEMPLATE_SHEET_NAME: &str = "Données";

/// Builds an empty single-sheet workbook containing only the six required
/// headers, ready to be filled in and re-uploaded.
pub fn blank_workbook() -> Result<Vec<u8>, DiagnosticError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(TEMPLATE_SHEET_NAME).map_err(template_err)?;
    for (column, header) in REQUIRED_HEADERS.iter().enumerate() {
        sheet
            .write_string(0, column as u16, *header)
            .map_err(template_err)?;
    }
    workbook.save_to_buffer().map_err(template_err)
}

fn template_err(err: rust_xlsxwriter::XlsxError) -> DiagnosticError {
    DiagnosticError::Render(format!("template workbook generation failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest;

    #[test]
    fn template_is_a_zip_container() {
        let bytes = blank_workbook().expect("build template");
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn template_parses_back_to_an_empty_dataset() {
        let bytes = blank_workbook().expect("build template");
        let dataset = ingest::parse_xlsx(&bytes).expect("parse template back");
        assert!(dataset.is_empty());
    }
}
