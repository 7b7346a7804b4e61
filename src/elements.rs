//! Image embedding helpers built on top of `genpdf` primitives.

use genpdf::elements::Image;
use genpdf::error::{Context as _, Error};
use genpdf::{Alignment, Mm, Scale, Size};
use image::GenericImageView;

// genpdf estimates embedded raster sizes at 300 dpi.
const EMBED_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_size(image: &image::DynamicImage) -> Size {
    let (px_width, px_height) = image.dimensions();
    Size::new(
        mm_from_f64(MM_PER_INCH * px_width as f64 / EMBED_DPI),
        mm_from_f64(MM_PER_INCH * px_height as f64 / EMBED_DPI),
    )
}

/// Decodes raster bytes and returns a centered `genpdf` image scaled to
/// `width_mm`, keeping the aspect ratio.
pub fn embedded_image(bytes: &[u8], width_mm: f64) -> Result<Image, Error> {
    let dynamic =
        image::load_from_memory(bytes).context("Failed to decode embedded image bytes")?;
    let natural = estimated_size(&dynamic);

    let mut element = Image::from_dynamic_image(dynamic)?;
    element.set_alignment(Alignment::Center);

    let natural_width = mm_to_f64(natural.width);
    if natural_width > f64::EPSILON {
        let scale = width_mm / natural_width;
        element.set_scale(Scale::new(scale, scale));
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let buffer = RgbImage::from_pixel(width, height, Rgb([200, 200, 200]));
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(buffer)
            .write_to(&mut png, ImageOutputFormat::Png)
            .expect("encode fixture PNG");
        png
    }

    #[test]
    fn decodes_and_builds_an_element() {
        let png = png_fixture(30, 20);
        embedded_image(&png, 160.0).expect("build embedded image");
    }

    #[test]
    fn rejects_corrupt_bytes() {
        assert!(embedded_image(b"not an image", 160.0).is_err());
    }
}
