use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::{DisplayError, DisplayService};
use crate::figure::{Figure, FigureLayout, render_figure};

/// Writes each figure as `figure_<n>_<title-slug>.png` (1-based) into a
/// directory, e.g. `figure_1_original-image.png`.
pub struct PngDirectory {
    dir: PathBuf,
    layout: FigureLayout,
    pending: Vec<Figure>,
    written: Vec<PathBuf>,
}

impl PngDirectory {
    pub fn new(dir: impl Into<PathBuf>, layout: FigureLayout) -> Self {
        Self {
            dir: dir.into(),
            layout,
            pending: Vec::new(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written by previous `show` calls.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DisplayService for PngDirectory {
    fn register(&mut self, figure: Figure) -> Result<(), DisplayError> {
        self.pending.push(figure);
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir).map_err(|source| DisplayError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let start = self.written.len();
        for (i, figure) in std::mem::take(&mut self.pending).into_iter().enumerate() {
            let canvas = render_figure(&figure, &self.layout)?;
            let path = self
                .dir
                .join(format!("figure_{}_{}.png", start + i + 1, title_slug(&figure.title)));
            canvas.save(&path).map_err(|source| DisplayError::Write {
                path: path.clone(),
                source,
            })?;
            info!("wrote {} ({})", path.display(), figure.title);
            self.written.push(path);
        }
        Ok(())
    }
}

/// Lowercase ASCII alphanumerics, every other run of characters becomes one `-`.
fn title_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("untitled");
    }
    slug
}
