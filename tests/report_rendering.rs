use pme_diagnostic::error::DiagnosticError;
use pme_diagnostic::model::{Indicators, Record};
use pme_diagnostic::{chart, fonts, report};
use sha2::{Digest, Sha256};

fn sample_dataset() -> Vec<Record> {
    vec![
        Record {
            store: "Énergie Verte Nord".into(),
            product: "Panneaux solaires".into(),
            revenue: 15000.0,
            cost: 8000.0,
            customers: 120,
            rating: 4.5,
        },
        Record {
            store: "ÉcoSolaires Sud".into(),
            product: "Batteries de stockage".into(),
            revenue: 20000.0,
            cost: 12000.0,
            customers: 150,
            rating: 4.8,
        },
    ]
}

fn sample_indicators() -> Indicators {
    Indicators {
        total_revenue: 35000.0,
        total_cost: 20000.0,
        margin_amount: 15000.0,
        margin_percentage: 15000.0 / 35000.0 * 100.0,
        average_rating: 4.65,
    }
}

/// Renders the sample report, or `None` when fonts are missing in the
/// environment (bundled Roboto for the PDF, a system font for the chart).
fn render_sample_report(test: &str) -> Option<Vec<u8>> {
    if !fonts::default_fonts_available() {
        eprintln!(
            "Skipping {test}: bundled fonts missing. See assets/fonts/README.md or set {}.",
            fonts::FONTS_DIR_ENV
        );
        return None;
    }

    let dataset = sample_dataset();
    let chart_png = match chart::render(&dataset) {
        Ok(png) => png,
        Err(DiagnosticError::Render(message)) if message.to_lowercase().contains("font") => {
            eprintln!("Skipping {test}: no usable system font for chart text ({message})");
            return None;
        }
        Err(other) => panic!("unexpected chart error: {other:?}"),
    };

    let recommendations = vec![
        "Votre marge est faible. Envisagez de réduire les coûts ou d'augmenter les prix."
            .to_string(),
    ];
    let bytes = report::compose(&dataset, &sample_indicators(), &recommendations, &chart_png)
        .expect("compose sample report");
    Some(bytes)
}

/// Zeroes the volatile bytes after `tag` up to `terminator`.
fn scrub_delimited(data: &mut [u8], tag: &[u8], terminator: u8) {
    let mut index = 0;
    while index + tag.len() <= data.len() {
        if data[index..].starts_with(tag) {
            let mut cursor = index + tag.len();
            while cursor < data.len() && data[cursor] != terminator {
                if !matches!(data[cursor], b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                    data[cursor] = b'0';
                }
                cursor += 1;
            }
            index = cursor;
        }
        index += 1;
    }
}

/// Zeroes the volatile bytes between a `start` and `end` marker pair.
fn scrub_between(data: &mut [u8], start: &[u8], end: &[u8]) {
    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|window| window == needle)
    }

    let mut offset = 0;
    while let Some(position) = find(&data[offset..], start) {
        let begin = offset + position + start.len();
        let Some(end_position) = find(&data[begin..], end) else {
            break;
        };
        for byte in &mut data[begin..begin + end_position] {
            if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                *byte = b'0';
            }
        }
        offset = begin + end_position + end.len();
    }
}

/// Normalizes the PDF metadata that legitimately varies between renders:
/// timestamps, document identifiers and the producer string.
fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    let mut data = bytes.to_vec();
    scrub_delimited(&mut data, b"/CreationDate(", b')');
    scrub_delimited(&mut data, b"/ModDate(", b')');
    scrub_delimited(&mut data, b"/ID[", b']');
    scrub_delimited(&mut data, b"/Producer(", b')');
    for tag in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ] {
        let start = format!("<{tag}>");
        let end = format!("</{tag}>");
        scrub_between(&mut data, start.as_bytes(), end.as_bytes());
    }
    data
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_a_pdf_document() {
    let Some(bytes) = render_sample_report("renders_a_pdf_document") else {
        return;
    };
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000, "report should embed the chart image");
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes_a) = render_sample_report("rendering_is_deterministic") else {
        return;
    };
    let Some(bytes_b) = render_sample_report("rendering_is_deterministic") else {
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}
