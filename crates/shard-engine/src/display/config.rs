use std::path::PathBuf;

use crate::coords::Rgba8;

/// Environment variable overriding [`DisplayConfig::font_path`].
pub const FONT_ENV: &str = "SHARD_FONT";
/// Environment variable overriding [`DisplayConfig::title`].
pub const TITLE_ENV: &str = "SHARD_TITLE";

/// Window and surface settings, fixed before the surface is created.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub title: String,
    /// Surface size in pixels.
    pub width: u32,
    pub height: u32,
    /// Font file used for all text.
    pub font_path: PathBuf,
    /// Colour the surface is cleared to at the start of each frame.
    pub clear_color: Rgba8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Shard Game Engine".to_string(),
            width: 1280,
            height: 864,
            font_path: PathBuf::from("fonts/calibri.ttf"),
            clear_color: Rgba8::BLACK,
        }
    }
}

impl DisplayConfig {
    /// Defaults, with `SHARD_FONT` / `SHARD_TITLE` applied when set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|k| std::env::var(k).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(font) = var(FONT_ENV).filter(|v| !v.is_empty()) {
            self.font_path = PathBuf::from(font);
        }
        if let Some(title) = var(TITLE_ENV).filter(|v| !v.is_empty()) {
            self.title = title;
        }
        self
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
