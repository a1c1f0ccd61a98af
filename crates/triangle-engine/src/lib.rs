//! Triangle engine crate.
//!
//! A buffer-free triangle shader pair (`shader`) plus the minimal wgpu host that
//! runs it: device/surface management, the render pipeline, offscreen readback
//! and a single-window winit runtime.

pub mod color;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod shader;
pub mod window;
