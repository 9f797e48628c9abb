//! Backend resource ownership.
//!
//! Backends hand out [`Handle`]s into generation-checked [`Arena`]s instead of
//! raw native pointers. A handle outliving its resource is detected on lookup
//! (the slot generation no longer matches) rather than aliasing a new resource.
//!
//! [`ResourceCache`] memoizes handle creation per key for the texture and font
//! caches of the display layer.

mod arena;
mod cache;

pub use arena::{Arena, Handle};
pub use cache::ResourceCache;

/// Marker for texture handles (decoded image files).
#[derive(Debug)]
pub enum TextureKind {}

/// Marker for font handles (a font file opened at one point size).
#[derive(Debug)]
pub enum FontKind {}

/// Marker for rendered text handles (one string rasterized with one font).
#[derive(Debug)]
pub enum TextKind {}

pub type TextureHandle = Handle<TextureKind>;
pub type FontHandle = Handle<FontKind>;
pub type TextHandle = Handle<TextKind>;
