use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use histo_adjust::sample_image::{SAMPLE_HEIGHT, SAMPLE_WIDTH, write_sample_image};

#[derive(Parser, Debug)]
#[command(
    name = "sample_image",
    about = "Write a colour test card to try histo_adjust with",
    version
)]
struct Cli {
    /// Output file; the extension picks the format
    #[arg(default_value = "sample.png")]
    path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    write_sample_image(&cli.path)?;
    println!(
        "wrote {} ({}x{})",
        cli.path.display(),
        SAMPLE_WIDTH,
        SAMPLE_HEIGHT
    );
    Ok(())
}
