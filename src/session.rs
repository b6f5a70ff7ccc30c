//! Interactive run: ask for an image path, load it, derive the two adjusted
//! variants and hand all three figures to a display service.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use image::{ImageReader, RgbImage};
use log::debug;
use rand::Rng;

use crate::adjust::{AdjustConfig, AdjustError, Adjustments};
use crate::display::{DisplayError, DisplayService};
use crate::figure::Figure;

pub const PROMPT: &str = "Enter the path to the image: ";
pub const ORIGINAL_TITLE: &str = "Original Image";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("input closed before an image path was entered")]
    InputClosed,
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] AdjustError),
    #[error(transparent)]
    Display(#[from] DisplayError),
}

/// How a run ended when it did not hit an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// All three figures were shown.
    Completed(Adjustments),
    /// The file exists but could not be decoded; nothing was shown.
    DecodeFailed { path: PathBuf },
}

enum Stage {
    AwaitPath,
    Validate(String),
    Load(String),
    Process(RgbImage),
    Display {
        original: RgbImage,
        contrast: RgbImage,
        brightness: RgbImage,
        adjustments: Adjustments,
    },
    Done(Adjustments),
}

/// Drives one run over a prompt input and a message output.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run<G, D>(
        &mut self,
        config: &AdjustConfig,
        rng: &mut G,
        display: &mut D,
    ) -> Result<Outcome, SessionError>
    where
        G: Rng,
        D: DisplayService,
    {
        config.validate()?;

        let mut stage = Stage::AwaitPath;
        loop {
            stage = match stage {
                Stage::AwaitPath => match self.prompt_path()? {
                    Some(raw) if raw.is_empty() => {
                        writeln!(self.output, "Please enter a valid image path.")?;
                        Stage::AwaitPath
                    }
                    Some(raw) => Stage::Validate(raw),
                    None => return Err(SessionError::InputClosed),
                },
                Stage::Validate(raw) => {
                    if Path::new(&raw).is_file() {
                        Stage::Load(raw)
                    } else {
                        writeln!(
                            self.output,
                            "Error: File '{raw}' does not exist. Please try again."
                        )?;
                        Stage::AwaitPath
                    }
                }
                Stage::Load(raw) => match load_image(Path::new(&raw)) {
                    Ok(image) => Stage::Process(image),
                    Err(err) => {
                        debug!("decode of {raw} failed: {err}");
                        writeln!(
                            self.output,
                            "Error loading image from {raw}. Check the file path and permissions."
                        )?;
                        return Ok(Outcome::DecodeFailed { path: raw.into() });
                    }
                },
                Stage::Process(original) => {
                    let adjustments = config.sample(rng);
                    debug!(
                        "contrast factor {:.2}, brightness offset {}",
                        adjustments.contrast, adjustments.brightness
                    );
                    let contrast = adjustments.contrast_adjust().apply(&original);
                    let brightness = adjustments.brightness_adjust().apply(&original);
                    Stage::Display {
                        original,
                        contrast,
                        brightness,
                        adjustments,
                    }
                }
                Stage::Display {
                    original,
                    contrast,
                    brightness,
                    adjustments,
                } => {
                    display.register(Figure::new(ORIGINAL_TITLE, original))?;
                    display.register(Figure::new(adjustments.contrast_title(), contrast))?;
                    display.register(Figure::new(adjustments.brightness_title(), brightness))?;
                    display.show()?;
                    Stage::Done(adjustments)
                }
                Stage::Done(adjustments) => {
                    writeln!(self.output, "All operations completed.")?;
                    self.output.flush()?;
                    return Ok(Outcome::Completed(adjustments));
                }
            };
        }
    }

    /// `None` at end of input. Only the line terminator is stripped.
    fn prompt_path(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}

/// Decodes any format the `image` crate recognises, sniffing the content
/// rather than trusting the extension, and converts it to 8-bit RGB.
pub fn load_image(path: &Path) -> Result<RgbImage, image::ImageError> {
    let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!(
        "decoded {} as {}x{} {:?} ({})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color(),
        ByteSize::b(decoded.as_bytes().len() as u64)
    );
    Ok(decoded.into_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt_once(input: &str) -> Option<String> {
        let mut session = Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let path = session.prompt_path().expect("prompt");
        assert_eq!(session.into_output(), PROMPT.as_bytes());
        path
    }

    #[test]
    fn prompt_strips_only_the_line_terminator() {
        assert_eq!(prompt_once("a.png\n").as_deref(), Some("a.png"));
        assert_eq!(prompt_once("a.png\r\n").as_deref(), Some("a.png"));
        assert_eq!(prompt_once(" spaced name.png \n").as_deref(), Some(" spaced name.png "));
        assert_eq!(prompt_once("last-line").as_deref(), Some("last-line"));
        assert_eq!(prompt_once("\n").as_deref(), Some(""));
    }

    #[test]
    fn prompt_reports_end_of_input() {
        assert_eq!(prompt_once(""), None);
    }

    #[test]
    fn load_image_sniffs_content_not_extension() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("picture.dat");
        RgbImage::from_pixel(3, 2, image::Rgb([1, 2, 3]))
            .save_with_format(&path, image::ImageFormat::Png)
            .expect("save");

        let img = load_image(&path).expect("decode");
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [1, 2, 3]);
    }

    #[test]
    fn load_image_rejects_garbage() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").expect("write");
        assert!(load_image(&path).is_err());
    }
}
