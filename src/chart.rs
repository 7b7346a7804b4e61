//! Chart Renderer: revenue-per-product bar chart as in-memory PNG bytes.
//!
//! One bar per distinct product in first-seen order, bar value = summed
//! revenue. The artifact is produced for embedding into the PDF report and
//! never touches the filesystem.

use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};
use log::debug;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::DiagnosticError;
use crate::model::Record;

/// Raster dimensions of the generated chart, sized for a full-width embed
/// on an A4 page.
pub const CHART_WIDTH_PX: u32 = 1100;
pub const CHART_HEIGHT_PX: u32 = 600;

const CHART_TITLE: &str = "Revenu par produit";

/// Renders the bar chart and returns PNG-encoded bytes.
///
/// Fails with [`DiagnosticError::NoDataToChart`] when the dataset holds no
/// product.
pub fn render(dataset: &[Record]) -> Result<Vec<u8>, DiagnosticError> {
    let totals = revenue_by_product(dataset);
    if totals.is_empty() {
        return Err(DiagnosticError::NoDataToChart);
    }
    debug!("charting {} distinct products", totals.len());

    let mut raw = vec![0u8; (CHART_WIDTH_PX * CHART_HEIGHT_PX * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut raw, (CHART_WIDTH_PX, CHART_HEIGHT_PX))
            .into_drawing_area();
        root.fill(&WHITE).map_err(chart_err)?;

        let highest = totals.iter().map(|(_, value)| *value).fold(0.0_f64, f64::max);
        let y_max = if highest > 0.0 { highest * 1.1 } else { 1.0 };

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 36).into_font().color(&BLUE))
            .margin(12)
            .x_label_area_size(150)
            .y_label_area_size(80)
            .build_cartesian_2d((0..totals.len()).into_segmented(), 0.0_f64..y_max)
            .map_err(chart_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(totals.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => totals
                    .get(*index)
                    .map(|(product, _)| product.clone())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .x_label_style(
                ("sans-serif", 16)
                    .into_font()
                    .transform(FontTransform::Rotate90)
                    .color(&GREEN),
            )
            .y_label_style(("sans-serif", 18).into_font().color(&RED))
            .draw()
            .map_err(chart_err)?;

        chart
            .draw_series(totals.iter().enumerate().map(|(index, (_, value))| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(index), 0.0),
                        (SegmentValue::Exact(index + 1), *value),
                    ],
                    BLUE.filled(),
                )
            }))
            .map_err(chart_err)?;

        root.present().map_err(chart_err)?;
    }

    let buffer = ImageBuffer::<Rgb<u8>, _>::from_raw(CHART_WIDTH_PX, CHART_HEIGHT_PX, raw)
        .ok_or_else(|| DiagnosticError::Render("chart buffer has unexpected size".into()))?;
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(buffer)
        .write_to(&mut png, ImageOutputFormat::Png)
        .map_err(|err| DiagnosticError::Render(format!("PNG encoding failed: {err}")))?;
    Ok(png)
}

/// Sums revenue per distinct product, preserving first-seen order.
fn revenue_by_product(dataset: &[Record]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for record in dataset {
        match totals
            .iter_mut()
            .find(|(product, _)| *product == record.product)
        {
            Some((_, total)) => *total += record.revenue,
            None => totals.push((record.product.clone(), record.revenue)),
        }
    }
    totals
}

fn chart_err<E>(err: DrawingAreaErrorKind<E>) -> DiagnosticError
where
    E: std::error::Error + Send + Sync,
{
    DiagnosticError::Render(format!("chart rendering failed: {err}"))
}
