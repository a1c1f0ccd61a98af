//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue, windowed or headless
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod gpu;
mod headless;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use headless::HeadlessGpu;
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
