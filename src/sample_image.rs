use std::path::Path;

use image::{Rgb, RgbImage};

pub const SAMPLE_WIDTH: u32 = 640;
pub const SAMPLE_HEIGHT: u32 = 480;

/// Generates a colour test card:
/// - red ramps from 0 to 255 left to right
/// - green ramps from 0 to 255 top to bottom
/// - a blue disc (blue = 255) sits in the centre, blue is 40 elsewhere
///
/// Every channel spans a wide range of values, so all three histograms show
/// something when the card is fed to `histo_adjust`.
pub fn generate_sample_image(width: u32, height: u32) -> RgbImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 4.0;

    RgbImage::from_fn(width, height, |x, y| {
        let red = ramp(x, width);
        let green = ramp(y, height);
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let blue = if dx * dx + dy * dy <= radius * radius {
            255
        } else {
            40
        };
        Rgb([red, green, blue])
    })
}

fn ramp(pos: u32, len: u32) -> u8 {
    if len <= 1 {
        return 0;
    }
    (pos as u64 * 255 / (len as u64 - 1)) as u8
}

/// Saves a `SAMPLE_WIDTH` x `SAMPLE_HEIGHT` card; the format follows the
/// file extension.
pub fn write_sample_image(path: &Path) -> Result<(), image::ImageError> {
    generate_sample_image(SAMPLE_WIDTH, SAMPLE_HEIGHT).save(path)
}
