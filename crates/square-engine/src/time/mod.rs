//! Time subsystem.
//!
//! Two timing domains drive a renderer:
//! - physics uses the fixed `RendererProperties::fixed_dt`
//! - rendering uses the wall-clock delta produced by a per-renderer `FrameClock`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
