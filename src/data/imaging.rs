// ============================================================
// Layer 4 — Image Preprocessing for OCR
// ============================================================
// Scanned pages OCR far better as clean black-on-white images.
//
//   decode → (downscale) → grayscale → Otsu threshold → binarize
//
// Otsu's method picks the threshold t that maximizes the
// between-class variance of the intensity histogram:
//
//   σ²_B(t) = w_B(t) · w_F(t) · (μ_B(t) − μ_F(t))²
//
// where w are the pixel counts at or below / above t and μ their
// mean intensities. Pixels > t become white, the rest black.
//
// An image with a single intensity level has no threshold at all.
// That is a blank page and is reported as such, so the extractor
// can skip the OCR engine.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};

/// Outcome of preparing one image for OCR.
#[derive(Debug)]
pub enum PreparedImage {
    /// Nothing but one intensity level.
    Blank,
    /// Binarized black-on-white page and the threshold used.
    Binarized { image: GrayImage, threshold: u8 },
}

/// Full preprocessing chain for a decoded image.
pub fn prepare_for_ocr(image: DynamicImage, resize_width: Option<u32>) -> PreparedImage {
    let image = match resize_width {
        Some(width) => downscale_to_width(image, width),
        None => image,
    };
    let mut gray = image.to_luma8();

    match otsu_threshold(&gray) {
        None => PreparedImage::Blank,
        Some(threshold) => {
            binarize(&mut gray, threshold);
            PreparedImage::Binarized { image: gray, threshold }
        }
    }
}

/// Shrink images wider than `width`, keeping the aspect ratio.
/// Narrower images are returned untouched.
pub fn downscale_to_width(image: DynamicImage, width: u32) -> DynamicImage {
    if width == 0 || image.width() <= width {
        return image;
    }
    let height = ((image.height() as u64 * width as u64) / image.width() as u64).max(1) as u32;
    image.resize_exact(width, height, FilterType::Triangle)
}

/// Otsu threshold of a grayscale image, or `None` when the image
/// holds fewer than two distinct intensities.
pub fn otsu_threshold(gray: &GrayImage) -> Option<u8> {
    let mut histogram = [0u64; 256];
    for Luma([value]) in gray.pixels() {
        histogram[*value as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    let weighted_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut background_weight = 0u64;
    let mut background_sum    = 0f64;
    let mut best: Option<(u8, f64)> = None;

    for (level, &count) in histogram.iter().enumerate() {
        background_weight += count;
        if background_weight == 0 {
            continue;
        }
        let foreground_weight = total - background_weight;
        if foreground_weight == 0 {
            break;
        }
        background_sum += level as f64 * count as f64;

        let mean_b = background_sum / background_weight as f64;
        let mean_f = (weighted_sum - background_sum) / foreground_weight as f64;
        let variance =
            background_weight as f64 * foreground_weight as f64 * (mean_b - mean_f).powi(2);

        if best.map_or(true, |(_, v)| variance > v) {
            best = Some((level as u8, variance));
        }
    }

    best.map(|(level, _)| level)
}

/// In place: `> threshold` → 255, otherwise 0.
pub fn binarize(gray: &mut GrayImage, threshold: u8) {
    for Luma([value]) in gray.pixels_mut() {
        *value = if *value > threshold { 255 } else { 0 };
    }
}

/// Encode a grayscale image as PNG in memory.
pub fn encode_png(gray: &GrayImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    gray.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(width: u32, height: u32, dark: u8, light: u8) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            if x < width / 4 { Luma([dark]) } else { Luma([light]) }
        })
    }

    #[test]
    fn threshold_separates_two_tones() {
        let img = two_tone(40, 10, 50, 200);
        let t = otsu_threshold(&img).unwrap();
        assert!((50..200).contains(&t), "threshold {t}");
    }

    #[test]
    fn uniform_image_has_no_threshold() {
        let white = GrayImage::from_pixel(16, 16, Luma([255]));
        assert_eq!(otsu_threshold(&white), None);
        let black = GrayImage::from_pixel(16, 16, Luma([0]));
        assert_eq!(otsu_threshold(&black), None);
    }

    #[test]
    fn binarize_produces_only_black_and_white() {
        let mut img = two_tone(8, 8, 90, 170);
        let t = otsu_threshold(&img).unwrap();
        binarize(&mut img, t);
        assert!(img.pixels().all(|Luma([v])| *v == 0 || *v == 255));
        assert_eq!(img.get_pixel(0, 0), &Luma([0]));
        assert_eq!(img.get_pixel(7, 7), &Luma([255]));
    }

    #[test]
    fn blank_page_is_detected() {
        let page = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([255])));
        assert!(matches!(prepare_for_ocr(page, Some(1200)), PreparedImage::Blank));
    }

    #[test]
    fn wide_images_are_downscaled() {
        let wide = DynamicImage::ImageLuma8(GrayImage::new(2400, 600));
        let scaled = downscale_to_width(wide, 1200);
        assert_eq!((scaled.width(), scaled.height()), (1200, 300));

        let narrow = DynamicImage::ImageLuma8(GrayImage::new(800, 600));
        assert_eq!(downscale_to_width(narrow, 1200).width(), 800);
    }

    #[test]
    fn png_encoding_round_trips_dimensions() {
        let img = two_tone(12, 7, 0, 255);
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }
}
