//! Report Composer: fixed single-page A4 layout.
//!
//! The layout mirrors the printed diagnostic: centered title, the
//! "Indicateurs clés" block, the revenue chart, the "Recommandations"
//! block, and the attribution line pinned to the bottom-right corner via
//! the page decorator footer. There is no pagination; overflowing content
//! is an accepted limitation.

use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Margins, PaperSize};
use log::debug;

use crate::builder::DocumentBuilder;
use crate::elements;
use crate::error::DiagnosticError;
use crate::model::{Indicators, Record};

/// Fixed download name of the generated report.
pub const REPORT_FILE_NAME: &str = "rapport_pme.pdf";
/// MIME type the report is served with.
pub const REPORT_MIME: &str = "application/pdf";

const TITLE: &str = "Diagnostic PME - Rapport d'Analyse";
const INDICATORS_HEADING: &str = "Indicateurs clés";
const RECOMMENDATIONS_HEADING: &str = "Recommandations";
const ATTRIBUTION: &str = "Fait par HP-Data";

const TITLE_COLOR: Color = Color::Rgb(0x1e, 0x90, 0xff);
const HEADING_COLOR: Color = Color::Rgb(0xff, 0x63, 0x47);

const PAGE_MARGIN_MM: f64 = 15.0;
const FOOTER_HEIGHT_MM: f64 = 8.0;
const CHART_WIDTH_MM: f64 = 160.0;

/// Assembles the final PDF document and returns its bytes.
///
/// The dataset itself is not laid out in the body; only its row count is
/// reported. Corrupt chart bytes fail with [`DiagnosticError::Render`].
pub fn compose(
    dataset: &[Record],
    indicators: &Indicators,
    recommendations: &[String],
    chart_png: &[u8],
) -> Result<Vec<u8>, DiagnosticError> {
    // Decode the chart before any font work so corrupt artifacts surface
    // as the embedding failure they are.
    let chart = elements::embedded_image(chart_png, CHART_WIDTH_MM)?;
    debug!(
        "composing report for {} rows, {} recommendations",
        dataset.len(),
        recommendations.len()
    );

    let mut document = DocumentBuilder::new()
        .with_paper_size(PaperSize::A4)
        .with_margins(Margins::all(PAGE_MARGIN_MM))
        .with_footer(FOOTER_HEIGHT_MM, attribution_line)
        .build()?;
    document.set_title(TITLE);

    let mut title = Paragraph::default();
    title.push_styled(TITLE, title_style());
    title.set_alignment(Alignment::Center);
    document.push(title);
    document.push(Break::new(2));

    document.push(heading(INDICATORS_HEADING));
    document.push(Break::new(1));
    for line in indicator_lines(indicators) {
        document.push(Paragraph::new(line));
        document.push(Break::new(0.4));
    }

    document.push(Break::new(1));
    document.push(chart);
    document.push(Break::new(1.5));

    document.push(heading(RECOMMENDATIONS_HEADING));
    document.push(Break::new(1));
    for recommendation in recommendations {
        document.push(Paragraph::new(recommendation.as_str()));
        document.push(Break::new(1));
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(bytes)
}

fn title_style() -> Style {
    let mut style = Style::new();
    style.set_bold();
    style.set_font_size(16);
    style.set_color(TITLE_COLOR);
    style
}

fn heading(text: &str) -> Paragraph {
    let mut style = Style::new();
    style.set_bold();
    style.set_font_size(14);
    style.set_color(HEADING_COLOR);

    let mut paragraph = Paragraph::default();
    paragraph.push_styled(text, style);
    paragraph
}

fn attribution_line() -> Paragraph {
    let mut style = Style::new();
    style.set_bold();
    style.set_font_size(10);
    style.set_color(TITLE_COLOR);

    let mut line = Paragraph::default();
    line.push_styled(ATTRIBUTION, style);
    line.set_alignment(Alignment::Right);
    line
}

/// The four indicator lines with their fixed unit suffixes.
fn indicator_lines(indicators: &Indicators) -> [String; 4] {
    [
        format!("Revenu total : {} €", format_amount(indicators.total_revenue)),
        format!("Coût total : {} €", format_amount(indicators.total_cost)),
        format!("Marge brute : {:.2} %", indicators.margin_percentage),
        format!(
            "Avis moyen des clients : {:.1} / 5",
            indicators.average_rating
        ),
    ]
}

/// Whole amounts print without decimals, fractional ones with two.
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
