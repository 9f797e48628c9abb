//! Platform event mapping.

mod winit_events;

pub use winit_events::WinitEventMapper;
