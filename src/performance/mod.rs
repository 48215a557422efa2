//! 性能遥测

pub mod telemetry;

pub use telemetry::{CaptionState, FrameTelemetry, FrameTimeSampler, CAPTION_INTERVAL};
