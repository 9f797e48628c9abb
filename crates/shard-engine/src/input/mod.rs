//! Input subsystem.
//!
//! Backend events are popped from an [`EventSource`](crate::backend::EventSource),
//! normalized into [`InputEvent`]s and dispatched synchronously to the
//! listeners registered for their [`InputKind`]. Public API does not expose
//! winit types; [`platform`] holds the winit mapping used by the runtime.

mod event;
mod listeners;
mod normalizer;
mod types;

pub mod platform;

pub use event::{InputEvent, InputKind};
pub use listeners::{listener, InputListener, ListenerRef, Listeners};
pub use normalizer::{normalize, InputConfig, InputNormalizer, PollState};
pub use types::{ButtonState, Key, MouseButton};
