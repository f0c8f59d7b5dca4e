//! Class-partitioned updates for multi-object trackers.
//!
//! Trackers that associate a flat detection batch let detections of one class
//! match tracks of another. [`PerClassTracker`] wraps any tracker exposing
//! [`UpdateTracks`] and [`ActiveTracks`] and runs it once per class present in
//! a frame, each time against that class's own saved tracks.
//!
//! ```ignore
//! use perclass_track::{PerClassConfig, PerClassTracker};
//!
//! let mut tracker = PerClassTracker::new(
//!     MyTracker::default(),
//!     PerClassConfig { per_class: true, ..Default::default() },
//! );
//! let tracks = tracker.update(detections.view(), frame.view())?;
//! ```

pub mod error;
pub mod integration;
pub mod logging;
pub mod tracker;

pub use error::{Error, Result};
pub use integration::{DetectionBuilder, DetectionSource, IntoDetectionBatch, TrackerPipeline};
pub use tracker::{
    ActiveTracks, Detection, PerClassConfig, PerClassDispatcher, PerClassTracker, Rect,
    TrackRecord, UpdateTracks,
};
