//! Trait for object detection inference backends.

use ndarray::{Array2, ArrayView3};

use crate::tracker::{Detection, detections_to_batch};

/// Trait for object detection inference backends.
///
/// Implement this trait to connect any detection model to a tracker.
///
/// # Example
///
/// ```ignore
/// use perclass_track::DetectionSource;
/// use ndarray::{Array2, ArrayView3};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, image: ArrayView3<'_, u8>) -> Result<Array2<f32>, Self::Error> {
///         Ok(Array2::zeros((0, 6)))
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on an `(height, width, channels)` frame.
    ///
    /// # Returns
    /// A detection batch with rows `x1, y1, x2, y2, conf, cls, ...`, or an error.
    fn detect(&mut self, image: ArrayView3<'_, u8>) -> Result<Array2<f32>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to a detection batch.
pub trait IntoDetectionBatch {
    /// Convert the output into an `(n, 6+)` detection batch.
    fn into_detection_batch(self) -> Array2<f32>;
}

impl IntoDetectionBatch for Vec<Detection> {
    fn into_detection_batch(self) -> Array2<f32> {
        detections_to_batch(&self)
    }
}

impl IntoDetectionBatch for Array2<f32> {
    fn into_detection_batch(self) -> Array2<f32> {
        self
    }
}
