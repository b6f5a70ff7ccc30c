//! Presentation of finished figures.
//!
//! Building figures and presenting them are separate steps: services collect
//! figures through [`DisplayService::register`] and present all of them at
//! once from [`DisplayService::show`].

pub mod png;
pub mod window;

use std::path::PathBuf;

use crate::figure::{Figure, FigureError};

pub use png::PngDirectory;
pub use window::WindowDisplay;

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error(transparent)]
    Figure(#[from] FigureError),
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("viewer window failed: {0}")]
    Window(String),
}

pub trait DisplayService {
    /// Queues a figure. Nothing is presented yet.
    fn register(&mut self, figure: Figure) -> Result<(), DisplayError>;

    /// Presents every queued figure together. May block until the user is
    /// done looking at them.
    fn show(&mut self) -> Result<(), DisplayError>;
}

/// Forwards every figure to each service, and shows them in insertion order.
#[derive(Default)]
pub struct FanOut {
    services: Vec<Box<dyn DisplayService>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, service: impl DisplayService + 'static) {
        self.services.push(Box::new(service));
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl DisplayService for FanOut {
    fn register(&mut self, figure: Figure) -> Result<(), DisplayError> {
        for service in &mut self.services {
            service.register(figure.clone())?;
        }
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        for service in &mut self.services {
            service.show()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    struct Tagged {
        tag: &'static str,
        log: Log,
    }

    impl DisplayService for Tagged {
        fn register(&mut self, figure: Figure) -> Result<(), DisplayError> {
            self.log.0.borrow_mut().push(format!("{}:register:{}", self.tag, figure.title));
            Ok(())
        }

        fn show(&mut self) -> Result<(), DisplayError> {
            self.log.0.borrow_mut().push(format!("{}:show", self.tag));
            Ok(())
        }
    }

    #[test]
    fn fan_out_forwards_in_order() {
        let log = Log::default();
        let mut fan = FanOut::new();
        assert!(fan.is_empty());
        fan.push(Tagged { tag: "a", log: log.clone() });
        fan.push(Tagged { tag: "b", log: log.clone() });

        fan.register(Figure::new("one", RgbImage::new(1, 1))).unwrap();
        fan.show().unwrap();

        assert_eq!(
            *log.0.borrow(),
            vec!["a:register:one", "b:register:one", "a:show", "b:show"]
        );
    }
}
