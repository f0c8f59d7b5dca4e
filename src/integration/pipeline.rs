//! TrackerPipeline for combining detection with class-partitioned tracking.

use ndarray::{Array2, ArrayView3};
use thiserror::Error;

use crate::tracker::{ActiveTracks, PerClassConfig, PerClassTracker, UpdateTracks};

use super::DetectionSource;

/// Failure of one pipeline step.
#[derive(Debug, Error)]
pub enum PipelineError<D, T> {
    #[error("detection failed: {0}")]
    Detection(D),
    #[error("tracker update failed: {0}")]
    Tracker(T),
}

/// A combined tracker that bundles detection inference with a
/// class-partitioned tracker.
pub struct TrackerPipeline<D: DetectionSource, U: UpdateTracks + ActiveTracks> {
    detector: D,
    tracker: PerClassTracker<U>,
}

impl<D: DetectionSource, U: UpdateTracks + ActiveTracks> TrackerPipeline<D, U> {
    /// Create a new tracking pipeline with the given detector, tracker and config.
    pub fn new(detector: D, tracker: U, config: PerClassConfig) -> Self {
        Self {
            detector,
            tracker: PerClassTracker::new(tracker, config),
        }
    }

    /// Create a new pipeline that tracks every class independently.
    pub fn with_default_config(detector: D, tracker: U) -> Self {
        Self {
            detector,
            tracker: PerClassTracker::with_default_config(tracker),
        }
    }

    /// Process a single frame and return its track batch.
    ///
    /// This method runs detection on the frame and then updates the tracker
    /// with the detected objects.
    pub fn process_frame(
        &mut self,
        image: ArrayView3<'_, u8>,
    ) -> Result<Array2<f32>, PipelineError<D::Error, U::Error>> {
        let detections = self
            .detector
            .detect(image)
            .map_err(PipelineError::Detection)?;
        self.tracker
            .update(detections.view(), image)
            .map_err(PipelineError::Tracker)
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &PerClassTracker<U> {
        &self.tracker
    }

    /// Get a mutable reference to the underlying tracker.
    pub fn tracker_mut(&mut self) -> &mut PerClassTracker<U> {
        &mut self.tracker
    }
}
