use image::RgbImage;

pub const BIN_COUNT: usize = 256;

/// Colour channel of a decoded image, in decoder order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "Red",
            Channel::Green => "Green",
            Channel::Blue => "Blue",
        }
    }

    /// Panel caption, e.g. "Red Channel Histogram".
    pub fn label(self) -> String {
        format!("{} Channel Histogram", self.name())
    }

    /// Line colour used when plotting this channel.
    pub fn plot_rgb(self) -> [u8; 3] {
        match self {
            Channel::Red => [220, 40, 40],
            Channel::Green => [40, 160, 60],
            Channel::Blue => [40, 80, 220],
        }
    }
}

/// Count of samples at each of the 256 intensity values of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BIN_COUNT],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            bins: [0; BIN_COUNT],
        }
    }
}

impl Histogram {
    pub fn bins(&self) -> &[u64; BIN_COUNT] {
        &self.bins
    }

    pub fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Largest bin, 0 for an empty histogram.
    pub fn peak(&self) -> u64 {
        self.bins.iter().copied().max().unwrap_or(0)
    }
}

pub fn channel_histogram(image: &RgbImage, channel: Channel) -> Histogram {
    let mut histogram = Histogram::default();
    let idx = channel.index();
    for px in image.pixels() {
        histogram.bins[px[idx] as usize] += 1;
    }
    histogram
}

/// One histogram per channel, computed in a single pass.
pub fn channel_histograms(image: &RgbImage) -> [Histogram; 3] {
    let mut out: [Histogram; 3] = Default::default();
    for px in image.pixels() {
        for (histogram, &sample) in out.iter_mut().zip(px.0.iter()) {
            histogram.bins[sample as usize] += 1;
        }
    }
    out
}
