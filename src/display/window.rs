//! Desktop viewer: one window listing every registered figure, top to bottom.

use iced::widget::{Column, column, container, row, scrollable, text};
use iced::{Element, Length, Size, window};
use image::DynamicImage;
use log::debug;

use super::{DisplayError, DisplayService};
use crate::figure::{Figure, FigureLayout, render_figure};

const WINDOW_TITLE: &str = "Histogram Adjust";

/// Renders figures as they are registered and opens the viewer on `show`.
/// `show` returns once the window is closed.
pub struct WindowDisplay {
    layout: FigureLayout,
    pending: Vec<RenderedFigure>,
}

#[derive(Debug, Clone)]
struct RenderedFigure {
    title: String,
    labels: [String; 4],
    axes: [Option<(&'static str, &'static str)>; 4],
    handle: iced::widget::image::Handle,
}

impl WindowDisplay {
    pub fn new(layout: FigureLayout) -> Self {
        Self {
            layout,
            pending: Vec::new(),
        }
    }
}

impl DisplayService for WindowDisplay {
    fn register(&mut self, figure: Figure) -> Result<(), DisplayError> {
        let canvas = render_figure(&figure, &self.layout)?;
        let (width, height) = canvas.dimensions();
        let pixels = DynamicImage::ImageRgb8(canvas).into_rgba8().into_raw();
        debug!("queued figure '{}' ({width}x{height})", figure.title);
        self.pending.push(RenderedFigure {
            labels: figure.panel_labels(),
            axes: figure.panel_axes(),
            title: figure.title,
            handle: iced::widget::image::Handle::from_rgba(width, height, pixels),
        });
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let figures = std::mem::take(&mut self.pending);
        let size = Size::new(
            self.layout.width as f32 + 40.0,
            (self.layout.height as f32 + 90.0) * figures.len().min(2) as f32 + 40.0,
        );
        run_viewer(figures, size).map_err(|e| DisplayError::Window(e.to_string()))
    }
}

fn run_viewer(figures: Vec<RenderedFigure>, size: Size) -> iced::Result {
    iced::application(
        move || FigureViewer {
            figures: figures.clone(),
        },
        FigureViewer::update,
        FigureViewer::view,
    )
    .title(WINDOW_TITLE)
    .window(window::Settings {
        size,
        ..Default::default()
    })
    .run()
}

struct FigureViewer {
    figures: Vec<RenderedFigure>,
}

// The viewer is read-only; closing the window is handled by the runtime.
#[derive(Debug, Clone)]
enum Message {}

impl FigureViewer {
    fn update(&mut self, message: Message) {
        match message {}
    }

    fn view<'a>(&'a self) -> Element<'a, Message> {
        let cards = self.figures.iter().map(|figure| -> Element<'a, Message> {
            let captions = row(figure.labels.iter().map(|label| -> Element<'a, Message> {
                text(label.as_str())
                    .size(14)
                    .width(Length::FillPortion(1))
                    .into()
            }))
            .spacing(8);

            let axes = row(figure.axes.iter().map(|axes| -> Element<'a, Message> {
                let caption = match axes {
                    Some((x, y)) => format!("x: {x}, y: {y}"),
                    None => String::new(),
                };
                text(caption).size(12).width(Length::FillPortion(1)).into()
            }))
            .spacing(8);

            column![
                text(figure.title.as_str()).size(20),
                captions,
                iced::widget::image(figure.handle.clone()).width(Length::Fill),
                axes,
            ]
            .spacing(6)
            .into()
        });

        container(scrollable(Column::with_children(cards).spacing(24).padding(16)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
