//! Linear per-sample adjustments: `out = clamp(round(sample * factor + offset), 0, 255)`.

use image::{ImageBuffer, Pixel};
use rand::Rng;

const CONTRAST_RANGE: (f32, f32) = (0.5, 2.0);
const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);

/// A linear transform applied identically to every sample of an image.
///
/// Contrast adjustment keeps `offset` at zero and scales; brightness
/// adjustment keeps `factor` at one and shifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearAdjust {
    pub factor: f32,
    pub offset: f32,
}

impl LinearAdjust {
    pub const IDENTITY: Self = Self {
        factor: 1.0,
        offset: 0.0,
    };

    pub fn new(factor: f32, offset: f32) -> Self {
        Self { factor, offset }
    }

    pub fn contrast(factor: f32) -> Self {
        Self::new(factor, 0.0)
    }

    pub fn brightness(offset: i32) -> Self {
        Self::new(1.0, offset as f32)
    }

    /// Returns a new image of the same size and pixel layout with the
    /// transform applied to every row, column and channel.
    pub fn apply<P>(&self, image: &ImageBuffer<P, Vec<u8>>) -> ImageBuffer<P, Vec<u8>>
    where
        P: Pixel<Subpixel = u8>,
    {
        let mut out = image.clone();
        let samples: &mut [u8] = &mut out;
        for sample in samples.iter_mut() {
            *sample = scale_sample(*sample, self.factor, self.offset);
        }
        out
    }
}

/// Shorthand for `LinearAdjust::new(factor, offset).apply(image)`.
pub fn apply<P>(image: &ImageBuffer<P, Vec<u8>>, factor: f32, offset: f32) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    LinearAdjust::new(factor, offset).apply(image)
}

/// Saturating linear map of one sample. Halfway cases round to even.
pub fn scale_sample(sample: u8, factor: f32, offset: f32) -> u8 {
    let value = (sample as f32 * factor + offset).round_ties_even();
    // NaN falls through `clamp` and casts to 0.
    value.clamp(0.0, 255.0) as u8
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AdjustError {
    #[error("invalid {name} range [{low}, {high}]")]
    InvalidRange {
        name: &'static str,
        low: String,
        high: String,
    },
}

/// Ranges the per-run parameters are drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustConfig {
    pub contrast_range: (f32, f32),
    pub brightness_range: (i32, i32),
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            contrast_range: CONTRAST_RANGE,
            brightness_range: BRIGHTNESS_RANGE,
        }
    }
}

impl AdjustConfig {
    pub fn validate(&self) -> Result<(), AdjustError> {
        let (low, high) = self.contrast_range;
        // The sampler needs a finite width, not just finite bounds.
        if !low.is_finite() || !high.is_finite() || low > high || !(high - low).is_finite() {
            return Err(AdjustError::InvalidRange {
                name: "contrast",
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        let (low, high) = self.brightness_range;
        if low > high {
            return Err(AdjustError::InvalidRange {
                name: "brightness",
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        Ok(())
    }

    /// Draws one contrast factor and one brightness offset, both uniform over
    /// their closed ranges. Call `validate` first; an inverted range panics.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Adjustments {
        let (c_low, c_high) = self.contrast_range;
        let (b_low, b_high) = self.brightness_range;
        Adjustments {
            contrast: rng.random_range(c_low..=c_high),
            brightness: rng.random_range(b_low..=b_high),
        }
    }
}

/// Parameters chosen once per run, reused for the figure titles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustments {
    pub contrast: f32,
    pub brightness: i32,
}

impl Adjustments {
    pub fn contrast_adjust(&self) -> LinearAdjust {
        LinearAdjust::contrast(self.contrast)
    }

    pub fn brightness_adjust(&self) -> LinearAdjust {
        LinearAdjust::brightness(self.brightness)
    }

    pub fn contrast_title(&self) -> String {
        format!("Image with Adjusted Contrast (Factor: {:.2})", self.contrast)
    }

    pub fn brightness_title(&self) -> String {
        format!("Image with Adjusted Brightness (Beta: {})", self.brightness)
    }
}
