mod appender;
mod color;
mod console_appender;
mod dispatcher;
mod file_appender;
mod item;
mod json_line_renderer;
mod line_renderer;

pub use appender::{Appender, Filter, LevelFilter, Renderer};
pub use color::{Color, ColorScheme, LevelColors};
pub use console_appender::ConsoleAppender;
pub use dispatcher::init;
pub use file_appender::FileAppender;
pub use item::Item;
pub use json_line_renderer::JsonLineRenderer;
pub use line_renderer::{LineRenderer, LineRendererBuilder};
