//! Text drawing: a per-frame request list over a persistent font cache.

mod key;
mod layer;

pub use key::FontKey;
pub use layer::{TextLayer, TextRequest};
