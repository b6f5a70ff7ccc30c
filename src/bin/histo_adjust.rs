use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use histo_adjust::display::{FanOut, PngDirectory, WindowDisplay};
use histo_adjust::{AdjustConfig, FigureLayout, Outcome, Session};

#[derive(Parser, Debug)]
#[command(
    name = "histo_adjust",
    about = "Show an image next to randomly contrast- and brightness-adjusted copies, with RGB histograms",
    version
)]
struct Cli {
    /// Seed for the random contrast factor and brightness offset
    #[arg(long)]
    seed: Option<u64>,

    /// Also write each figure as a PNG into this directory
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Do not open the viewer window (needs --output-dir)
    #[arg(long = "no-window", requires = "output_dir")]
    no_window: bool,

    /// Lower bound of the contrast factor
    #[arg(long, default_value_t = 0.5)]
    contrast_min: f32,

    /// Upper bound of the contrast factor
    #[arg(long, default_value_t = 2.0)]
    contrast_max: f32,

    /// Lower bound of the brightness offset
    #[arg(long, default_value_t = -100, allow_hyphen_values = true)]
    brightness_min: i32,

    /// Upper bound of the brightness offset
    #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
    brightness_max: i32,

    /// Figure width in pixels, split evenly between the four panels
    #[arg(long, default_value_t = 1600)]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 400)]
    height: u32,
}

impl Cli {
    fn adjust_config(&self) -> AdjustConfig {
        AdjustConfig {
            contrast_range: (self.contrast_min, self.contrast_max),
            brightness_range: (self.brightness_min, self.brightness_max),
        }
    }

    fn layout(&self) -> FigureLayout {
        FigureLayout {
            width: self.width,
            height: self.height,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = cli.adjust_config();
    config.validate()?;
    let layout = cli.layout();
    layout.validate()?;

    let mut display = FanOut::new();
    if let Some(dir) = &cli.output_dir {
        display.push(PngDirectory::new(dir, layout));
    }
    if !cli.no_window {
        display.push(WindowDisplay::new(layout));
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    match session.run(&config, &mut rng, &mut display)? {
        Outcome::Completed(_) => Ok(ExitCode::SUCCESS),
        Outcome::DecodeFailed { .. } => Ok(ExitCode::FAILURE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histo_adjust::FigureError;

    #[test]
    fn defaults_match_library_defaults() {
        let cli = Cli::try_parse_from(["histo_adjust"]).expect("parse");
        assert_eq!(cli.adjust_config(), AdjustConfig::default());
        assert_eq!(cli.layout(), FigureLayout::default());
        assert!(!cli.no_window);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn figure_size_flags_feed_the_layout() {
        let cli = Cli::try_parse_from(["histo_adjust", "--width", "800", "--height", "300"])
            .expect("parse");
        assert_eq!(
            cli.layout(),
            FigureLayout {
                width: 800,
                height: 300
            }
        );
        assert!(cli.layout().validate().is_ok());
    }

    #[test]
    fn undersized_layout_is_reported() {
        let cli = Cli::try_parse_from(["histo_adjust", "--width", "40"]).expect("parse");
        assert!(matches!(
            cli.layout().validate(),
            Err(FigureError::EmptyLayout { width: 40, height: 400 })
        ));
    }

    #[test]
    fn negative_brightness_bounds_parse() {
        let cli = Cli::try_parse_from([
            "histo_adjust",
            "--brightness-min",
            "-20",
            "--brightness-max",
            "-5",
            "--contrast-max",
            "1.5",
        ])
        .expect("parse");
        let config = cli.adjust_config();
        assert_eq!(config.brightness_range, (-20, -5));
        assert_eq!(config.contrast_range, (0.5, 1.5));
    }

    #[test]
    fn no_window_requires_output_dir() {
        assert!(Cli::try_parse_from(["histo_adjust", "--no-window"]).is_err());
        let cli = Cli::try_parse_from(["histo_adjust", "--no-window", "-o", "out"]).expect("parse");
        assert_eq!(cli.output_dir, Some(PathBuf::from("out")));
    }
}
