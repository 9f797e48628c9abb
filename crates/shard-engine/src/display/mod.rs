//! Game-facing display: composition of the texture cache, draw queue and
//! text layer over one backend.

mod config;
mod screen;

pub use config::{DisplayConfig, FONT_ENV, TITLE_ENV};
pub use screen::Display;
