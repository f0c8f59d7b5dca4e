//! Binding of one tracker to its own per-class dispatcher.

use ndarray::{Array2, ArrayView2, ArrayView3};

use crate::tracker::dispatcher::{
    ActiveTracks, DEFAULT_NUM_CLASSES, PerClassDispatcher, UpdateTracks,
};

/// Configuration for class-partitioned tracking.
#[derive(Debug, Clone)]
pub struct PerClassConfig {
    /// Track each class independently. Off by default.
    pub per_class: bool,
    /// Number of class ids the detector can emit.
    pub num_classes: usize,
}

impl Default for PerClassConfig {
    fn default() -> Self {
        Self {
            per_class: false,
            num_classes: DEFAULT_NUM_CLASSES,
        }
    }
}

/// A tracker whose updates go through its own [`PerClassDispatcher`].
///
/// The dispatcher is owned by this value, so two `PerClassTracker`s never
/// see each other's saved tracks.
pub struct PerClassTracker<U: ActiveTracks> {
    tracker: U,
    dispatcher: PerClassDispatcher<U::Track>,
}

impl<U: UpdateTracks + ActiveTracks> PerClassTracker<U> {
    pub fn new(tracker: U, config: PerClassConfig) -> Self {
        Self {
            tracker,
            dispatcher: PerClassDispatcher::new(config.num_classes)
                .with_per_class(config.per_class),
        }
    }

    /// Wrap `tracker` with partitioning enabled over the default class count.
    pub fn with_default_config(tracker: U) -> Self {
        Self::new(
            tracker,
            PerClassConfig {
                per_class: true,
                ..PerClassConfig::default()
            },
        )
    }

    /// Process one frame of detections and return the frame's tracks.
    pub fn update(
        &mut self,
        detections: ArrayView2<'_, f32>,
        image: ArrayView3<'_, u8>,
    ) -> Result<Array2<f32>, U::Error> {
        self.dispatcher.invoke(&mut self.tracker, detections, image)
    }

    pub fn set_per_class(&mut self, per_class: bool) {
        self.dispatcher.set_per_class(per_class);
    }

    /// Saved tracks of every class, indexed by class id.
    pub fn per_class_active_tracks(&self) -> &[Vec<U::Track>] {
        self.dispatcher.per_class_active_tracks()
    }

    pub fn dispatcher(&self) -> &PerClassDispatcher<U::Track> {
        &self.dispatcher
    }

    /// Get a reference to the wrapped tracker.
    pub fn tracker(&self) -> &U {
        &self.tracker
    }

    /// Get a mutable reference to the wrapped tracker.
    pub fn tracker_mut(&mut self) -> &mut U {
        &mut self.tracker
    }

    pub fn into_inner(self) -> U {
        self.tracker
    }
}

impl<U: UpdateTracks + ActiveTracks> UpdateTracks for PerClassTracker<U> {
    type Error = U::Error;

    fn update(
        &mut self,
        detections: ArrayView2<'_, f32>,
        image: ArrayView3<'_, u8>,
    ) -> Result<Array2<f32>, Self::Error> {
        self.dispatcher.invoke(&mut self.tracker, detections, image)
    }
}
