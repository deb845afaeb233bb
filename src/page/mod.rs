//! Page model and rendering.

pub mod chrome;
pub mod document;
pub mod format;
pub mod localizer;
pub mod markup;
pub mod renderer;
pub mod sections;

pub use chrome::apply_common_translations;
pub use document::{ChromeElement, Document, PAGE_META_CONTAINER};
pub use format::{format_date, format_integer};
pub use localizer::Localizer;
pub use renderer::{ContentRenderer, PageRenderer, RenderContext};
