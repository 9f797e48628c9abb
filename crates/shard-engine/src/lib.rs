//! Shard engine crate.
//!
//! Display and input layers of a small 2D game engine: deferred sprite,
//! shape and text drawing over a software canvas, time-gated input
//! normalization with listener dispatch, and the winit/wgpu runtime that
//! puts both on a window.

pub mod backend;
pub mod core;
pub mod coords;
pub mod device;
pub mod display;
pub mod input;
pub mod logging;
pub mod resource;
pub mod scene;
pub mod text;
pub mod time;
pub mod window;
