//! Figure composition: the image panel followed by one histogram line plot per
//! channel, rasterised into a single RGB buffer.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use plotters::prelude::*;

use crate::histogram::{BIN_COUNT, Channel, Histogram, channel_histograms};

const PANEL_COUNT: u32 = 4;
const PANEL_PADDING: u32 = 12;
const GRID_COLOR: RGBColor = RGBColor(225, 225, 225);
const AXIS_COLOR: RGBColor = RGBColor(60, 60, 60);

pub const X_AXIS_LABEL: &str = "Pixel Value";
pub const Y_AXIS_LABEL: &str = "Frequency";

#[derive(Debug, thiserror::Error)]
pub enum FigureError {
    #[error("figure layout {width}x{height} is too small for four panels")]
    EmptyLayout { width: u32, height: u32 },
    #[error("plotting failed: {0}")]
    Plot(String),
    #[error("plot buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },
}

/// Pixel size of a rendered figure. Panels split the width evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureLayout {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 400,
        }
    }
}

impl FigureLayout {
    pub fn panel_size(&self) -> (u32, u32) {
        (self.width / PANEL_COUNT, self.height)
    }

    /// Every panel needs room inside its padding.
    pub fn validate(&self) -> Result<(), FigureError> {
        let (panel_w, panel_h) = self.panel_size();
        if panel_w <= 2 * PANEL_PADDING || panel_h <= 2 * PANEL_PADDING {
            return Err(FigureError::EmptyLayout {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// An image, its title and its per-channel histograms.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub image: RgbImage,
    pub histograms: [Histogram; 3],
}

impl Figure {
    pub fn new(title: impl Into<String>, image: RgbImage) -> Self {
        let histograms = channel_histograms(&image);
        Self {
            title: title.into(),
            image,
            histograms,
        }
    }

    pub fn histogram(&self, channel: Channel) -> &Histogram {
        &self.histograms[channel.index()]
    }

    /// Panel captions in display order.
    pub fn panel_labels(&self) -> [String; 4] {
        [
            self.title.clone(),
            Channel::Red.label(),
            Channel::Green.label(),
            Channel::Blue.label(),
        ]
    }

    /// Axis names `(x, y)` per panel, in the order of [`Figure::panel_labels`].
    /// The image panel has no axes.
    pub fn panel_axes(&self) -> [Option<(&'static str, &'static str)>; 4] {
        let axes = Some((X_AXIS_LABEL, Y_AXIS_LABEL));
        [None, axes, axes, axes]
    }
}

/// Renders `figure` as one row of four panels on a white background.
///
/// Text is left to the presenter: captions come from [`Figure::panel_labels`]
/// and axis names from [`Figure::panel_axes`].
pub fn render_figure(figure: &Figure, layout: &FigureLayout) -> Result<RgbImage, FigureError> {
    layout.validate()?;
    let (panel_w, panel_h) = layout.panel_size();

    let mut canvas = RgbImage::from_pixel(layout.width, layout.height, Rgb([255, 255, 255]));

    let image_panel = render_image_panel(&figure.image, panel_w, panel_h);
    imageops::replace(&mut canvas, &image_panel, 0, 0);

    for (slot, channel) in Channel::ALL.into_iter().enumerate() {
        let panel = render_histogram_panel(figure.histogram(channel), channel, panel_w, panel_h)?;
        let x = (slot as u32 + 1) * panel_w;
        imageops::replace(&mut canvas, &panel, x as i64, 0);
    }

    Ok(canvas)
}

/// Scales the image to fit inside the padded panel, keeping its aspect ratio.
fn render_image_panel(image: &RgbImage, panel_w: u32, panel_h: u32) -> RgbImage {
    let mut panel = RgbImage::from_pixel(panel_w, panel_h, Rgb([255, 255, 255]));
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return panel;
    }

    let max_w = panel_w - 2 * PANEL_PADDING;
    let max_h = panel_h - 2 * PANEL_PADDING;
    let scale = (max_w as f64 / w as f64).min(max_h as f64 / h as f64);
    let fit_w = ((w as f64 * scale).round() as u32).clamp(1, max_w);
    let fit_h = ((h as f64 * scale).round() as u32).clamp(1, max_h);

    let scaled = if (fit_w, fit_h) == (w, h) {
        image.clone()
    } else {
        imageops::resize(image, fit_w, fit_h, FilterType::Triangle)
    };
    let x = (panel_w - fit_w) / 2;
    let y = (panel_h - fit_h) / 2;
    imageops::replace(&mut panel, &scaled, x as i64, y as i64);
    panel
}

fn render_histogram_panel(
    histogram: &Histogram,
    channel: Channel,
    width: u32,
    height: u32,
) -> Result<RgbImage, FigureError> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(FigureError::Buffer { width, height })?;
    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| FigureError::Plot(e.to_string()))?;

        let peak = histogram.peak();
        let y_max = peak + peak / 20 + 1;
        let x_max = BIN_COUNT as u32 - 1;
        let mut chart = ChartBuilder::on(&root)
            .margin(PANEL_PADDING)
            .build_cartesian_2d(0u32..x_max, 0u64..y_max)
            .map_err(|e| FigureError::Plot(e.to_string()))?;

        // Quarter lines of the frequency axis.
        for step in 1..=4u64 {
            let y = y_max * step / 4;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(0, y), (x_max, y)],
                    GRID_COLOR,
                )))
                .map_err(|e| FigureError::Plot(e.to_string()))?;
        }

        chart
            .draw_series([
                PathElement::new(vec![(0, 0), (x_max, 0)], AXIS_COLOR),
                PathElement::new(vec![(0, 0), (0, y_max)], AXIS_COLOR),
            ])
            .map_err(|e| FigureError::Plot(e.to_string()))?;

        let [r, g, b] = channel.plot_rgb();
        chart
            .draw_series(LineSeries::new(
                histogram
                    .bins()
                    .iter()
                    .enumerate()
                    .map(|(value, &count)| (value as u32, count)),
                RGBColor(r, g, b).stroke_width(2),
            ))
            .map_err(|e| FigureError::Plot(e.to_string()))?;

        root.present().map_err(|e| FigureError::Plot(e.to_string()))?;
    }

    RgbImage::from_raw(width, height, rgb).ok_or(FigureError::Buffer { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
    }

    #[test]
    fn figure_carries_histograms_of_its_image() {
        let figure = Figure::new("Original Image", gradient(64, 32));
        for channel in Channel::ALL {
            assert_eq!(figure.histogram(channel).total(), 64 * 32);
        }
        assert_eq!(figure.histogram(Channel::Blue).count(128), 64 * 32);
        assert_eq!(figure.panel_labels()[0], "Original Image");
        assert_eq!(figure.panel_labels()[3], "Blue Channel Histogram");
    }

    #[test]
    fn every_histogram_panel_names_its_axes() {
        let figure = Figure::new("t", gradient(2, 2));
        let axes = figure.panel_axes();
        assert_eq!(axes[0], None);
        for slot in 1..4 {
            assert_eq!(axes[slot], Some(("Pixel Value", "Frequency")));
        }
    }

    #[test]
    fn render_matches_layout_size() {
        let figure = Figure::new("t", gradient(300, 200));
        let layout = FigureLayout {
            width: 800,
            height: 240,
        };
        let canvas = render_figure(&figure, &layout).expect("render");
        assert_eq!(canvas.dimensions(), (800, 240));
    }

    #[test]
    fn histogram_panels_contain_channel_ink() {
        let figure = Figure::new("t", gradient(256, 256));
        let layout = FigureLayout::default();
        let canvas = render_figure(&figure, &layout).expect("render");
        let (panel_w, _) = layout.panel_size();

        for (slot, channel) in Channel::ALL.into_iter().enumerate() {
            let x0 = (slot as u32 + 1) * panel_w;
            let idx = channel.index();
            let found = (x0..x0 + panel_w)
                .flat_map(|x| (0..layout.height).map(move |y| (x, y)))
                .any(|(x, y)| {
                    let px = canvas.get_pixel(x, y).0;
                    (0..3).filter(|&i| i != idx).all(|i| px[idx] as i32 - px[i] as i32 > 40)
                });
            assert!(found, "no {channel:?} line drawn");
        }
    }

    #[test]
    fn image_panel_is_centred_and_fitted() {
        let image = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let figure = Figure::new("t", image);
        let layout = FigureLayout {
            width: 400,
            height: 100,
        };
        let canvas = render_figure(&figure, &layout).expect("render");
        // 100x100 panel, 76x76 fitted square centred at 12..88
        assert_eq!(canvas.get_pixel(50, 50).0, [0, 0, 0]);
        assert_eq!(canvas.get_pixel(5, 50).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(50, 5).0, [255, 255, 255]);
    }

    #[test]
    fn tiny_layout_is_rejected() {
        let figure = Figure::new("t", gradient(4, 4));
        let layout = FigureLayout {
            width: 40,
            height: 400,
        };
        assert!(matches!(
            render_figure(&figure, &layout),
            Err(FigureError::EmptyLayout { .. })
        ));
    }

    #[test]
    fn layout_validation_matches_render() {
        assert!(FigureLayout::default().validate().is_ok());
        assert!(FigureLayout { width: 400, height: 100 }.validate().is_ok());
        assert!(FigureLayout { width: 96, height: 400 }.validate().is_err());
        assert!(FigureLayout { width: 1600, height: 24 }.validate().is_err());
    }

    #[test]
    fn empty_image_still_renders() {
        let figure = Figure::new("t", RgbImage::new(0, 0));
        let canvas = render_figure(&figure, &FigureLayout::default()).expect("render");
        assert_eq!(canvas.dimensions(), (1600, 400));
    }
}
