//! GPU rendering.
//!
//! `TrianglePipeline` owns the render pipeline for the shader pair and records
//! the 3-vertex draw. `snapshot` renders the same draw offscreen and reads the
//! pixels back.

mod ctx;
mod snapshot;
mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use snapshot::{render_snapshot, Snapshot, SNAPSHOT_FORMAT};
pub use triangle::TrianglePipeline;
