//! Integration module for connecting object detection backends with a
//! class-partitioned tracker.
//!
//! Detectors stay outside this crate; they only need to hand over a detection
//! batch per frame through [`DetectionSource`].

mod builder;
mod detector;
mod pipeline;

pub use builder::DetectionBuilder;
pub use detector::{DetectionSource, IntoDetectionBatch};
pub use pipeline::{PipelineError, TrackerPipeline};
