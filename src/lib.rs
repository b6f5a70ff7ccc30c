//! Random contrast / brightness adjustment of an image, with per-channel
//! histograms rendered next to each variant.

pub mod adjust;
pub mod display;
pub mod figure;
pub mod histogram;
pub mod sample_image;
pub mod session;

pub use adjust::{AdjustConfig, AdjustError, Adjustments, LinearAdjust};
pub use display::{DisplayError, DisplayService};
pub use figure::{Figure, FigureError, FigureLayout};
pub use histogram::{Channel, Histogram};
pub use session::{Outcome, Session, SessionError};
