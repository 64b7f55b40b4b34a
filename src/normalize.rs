use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, Rgba, RgbaImage};
use std::path::Path;

pub const CANVAS_SIZE: u32 = 128;
pub const PADDING: u32 = 8;

/// Largest width/height the logo may occupy inside the canvas.
pub const CONTENT_BOX: u32 = CANVAS_SIZE - 2 * PADDING;

/// Decode `bytes` and center the logo on a transparent 128x128 canvas.
///
/// The logo is scaled down with Lanczos resampling to fit within the padded
/// box, keeping its aspect ratio. Images already small enough keep their size.
pub fn normalize_logo(bytes: &[u8]) -> Result<RgbaImage, ImageError> {
    let source = image::load_from_memory(bytes)?.to_rgba8();

    let (width, height) = fit_within(source.width(), source.height(), CONTENT_BOX);
    let scaled = if (width, height) == source.dimensions() {
        source
    } else {
        let mut source = source;
        premultiply_alpha(&mut source);
        let mut scaled = imageops::resize(&source, width, height, FilterType::Lanczos3);
        unpremultiply_alpha(&mut scaled);
        scaled
    };

    let mut canvas = RgbaImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Rgba([0, 0, 0, 0]));
    let x = (CANVAS_SIZE - scaled.width()) / 2;
    let y = (CANVAS_SIZE - scaled.height()) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

    Ok(canvas)
}

/// Dimensions of `width`x`height` shrunk to fit a `bound`x`bound` box.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    if width <= bound && height <= bound {
        return (width, height);
    }

    let scale = f64::min(bound as f64 / width as f64, bound as f64 / height as f64);
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, bound);
    (scaled(width), scaled(height))
}

/// Resampling runs on premultiplied colour so that fully transparent pixels
/// do not darken the edges of the logo.
fn premultiply_alpha(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        for channel in 0..3 {
            pixel[channel] = ((pixel[channel] as u32 * alpha + 127) / 255) as u8;
        }
    }
}

fn unpremultiply_alpha(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        let alpha = pixel[3] as u32;
        if alpha == 0 {
            continue;
        }
        for channel in 0..3 {
            let value = (pixel[channel] as u32 * 255 + alpha / 2) / alpha;
            pixel[channel] = value.min(255) as u8;
        }
    }
}

pub fn save_png<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<(), ImageError> {
    image.save_with_format(path, ImageFormat::Png)
}
