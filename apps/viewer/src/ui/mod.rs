//! Terminal rendering: the text map surface and the page view.

pub mod map;
pub mod render;

pub use map::TextMap;
pub use render::render_view;
