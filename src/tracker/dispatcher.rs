//! Class-partitioned dispatch of tracker updates.
//!
//! A tracker fed a mixed-class batch associates every detection against every
//! track, so a car detection can steal the identity of a nearby truck track.
//! [`PerClassDispatcher`] splits the batch by class and runs the tracker once
//! per class, swapping that class's saved tracks in before the call and back
//! out after it.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView2, ArrayView3, Axis, concatenate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tracker::detection::{DET_COLS, class_of};
use crate::tracker::track_record::{TRACK_COLS, empty_track_batch};

/// Number of classes a dispatcher keeps state for unless told otherwise.
pub const DEFAULT_NUM_CLASSES: usize = 80;

/// The per-frame update operation of a tracker.
///
/// Takes a detection batch (`x1, y1, x2, y2, conf, cls, ...`) and the frame it
/// came from, and returns the track batch for that frame
/// (`x1, y1, x2, y2, id, conf, cls, det_ind`).
pub trait UpdateTracks {
    /// Error returned by the update. Batch validation failures raised while
    /// dispatching are converted into it.
    type Error: From<Error>;

    fn update(
        &mut self,
        detections: ArrayView2<'_, f32>,
        image: ArrayView3<'_, u8>,
    ) -> std::result::Result<Array2<f32>, Self::Error>;
}

/// Access to the list of tracks a tracker is currently maintaining.
pub trait ActiveTracks {
    type Track;

    /// Move the active tracks out of the tracker, leaving it with none.
    fn take_active_tracks(&mut self) -> Vec<Self::Track>;

    /// Replace the tracker's active tracks.
    fn set_active_tracks(&mut self, tracks: Vec<Self::Track>);
}

/// Keeps one bucket of active tracks per class and routes updates through it.
///
/// Every class id in `[0, num_classes)` has a bucket for the lifetime of the
/// dispatcher. Buckets are only ever replaced, never removed.
#[derive(Debug, Clone)]
pub struct PerClassDispatcher<T> {
    per_class: bool,
    num_classes: usize,
    per_class_active_tracks: Vec<Vec<T>>,
}

impl<T> Default for PerClassDispatcher<T> {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_CLASSES)
    }
}

impl<T> PerClassDispatcher<T> {
    /// Create a dispatcher with an empty bucket for each of `num_classes`
    /// classes. Partitioning starts enabled.
    pub fn new(num_classes: usize) -> Self {
        Self {
            per_class: true,
            num_classes,
            per_class_active_tracks: (0..num_classes).map(|_| Vec::new()).collect(),
        }
    }

    /// Enable or disable partitioning. When disabled every call is forwarded
    /// to the tracker untouched.
    pub fn with_per_class(mut self, per_class: bool) -> Self {
        self.per_class = per_class;
        self
    }

    pub fn set_per_class(&mut self, per_class: bool) {
        self.per_class = per_class;
    }

    pub fn per_class(&self) -> bool {
        self.per_class
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Saved tracks for one class, or `None` if `class_id` is out of range.
    pub fn active_tracks(&self, class_id: usize) -> Option<&[T]> {
        self.per_class_active_tracks
            .get(class_id)
            .map(Vec::as_slice)
    }

    /// Saved tracks of every class, indexed by class id.
    pub fn per_class_active_tracks(&self) -> &[Vec<T>] {
        &self.per_class_active_tracks
    }

    /// Drop all saved tracks. Every class keeps an (empty) bucket.
    pub fn reset(&mut self) {
        for bucket in &mut self.per_class_active_tracks {
            bucket.clear();
        }
    }

    /// Run `tracker`'s update on `detections`, one class at a time.
    ///
    /// With partitioning disabled, or an empty batch, this is exactly
    /// `tracker.update(detections, image)`. Otherwise classes present in the
    /// batch are visited in ascending id order; classes absent from the batch
    /// keep their saved tracks untouched. The returned batch stacks the
    /// per-class outputs in the same order and is `(0, 8)` when no class
    /// produced tracks.
    ///
    /// Errors from the tracker are returned as-is. The failing class still
    /// gets back whatever the tracker held after the call, classes processed
    /// earlier keep their new state and later ones keep their old state.
    pub fn invoke<U>(
        &mut self,
        tracker: &mut U,
        detections: ArrayView2<'_, f32>,
        image: ArrayView3<'_, u8>,
    ) -> std::result::Result<Array2<f32>, U::Error>
    where
        U: UpdateTracks + ActiveTracks<Track = T>,
    {
        if !self.per_class || detections.is_empty() {
            return tracker.update(detections, image);
        }

        let by_class = partition_by_class(detections, self.num_classes)?;

        let mut per_class_tracks = Vec::with_capacity(by_class.len());
        for (&class_id, class_dets) in &by_class {
            debug!(class_id, shape = ?class_dets.dim(), "Processing class");

            let bucket = &mut self.per_class_active_tracks[class_id];
            tracker.set_active_tracks(std::mem::take(bucket));
            let result = tracker.update(class_dets.view(), image);
            *bucket = tracker.take_active_tracks();

            let tracks = result?;
            if !tracks.is_empty() {
                if tracks.ncols() != TRACK_COLS {
                    return Err(Error::InvalidTrackRow { got: tracks.ncols() }.into());
                }
                per_class_tracks.push(tracks);
            }
        }

        let tracks = stack_tracks(&per_class_tracks)?;
        debug!(shape = ?tracks.dim(), "Per-class update result");
        Ok(tracks)
    }
}

/// Group detection rows by class id.
///
/// Rows keep their relative order inside each group and the map iterates in
/// ascending class order. Every row is validated before anything is returned.
pub fn partition_by_class(
    detections: ArrayView2<'_, f32>,
    num_classes: usize,
) -> Result<BTreeMap<usize, Array2<f32>>> {
    if detections.ncols() < DET_COLS {
        return Err(Error::InvalidShape {
            expected: DET_COLS,
            got: detections.ncols(),
        });
    }

    let mut rows_by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, row) in detections.rows().into_iter().enumerate() {
        rows_by_class
            .entry(class_of(row, num_classes)?)
            .or_default()
            .push(i);
    }

    Ok(rows_by_class
        .into_iter()
        .map(|(class_id, rows)| (class_id, detections.select(Axis(0), &rows)))
        .collect())
}

fn stack_tracks(per_class_tracks: &[Array2<f32>]) -> Result<Array2<f32>> {
    if per_class_tracks.is_empty() {
        return Ok(empty_track_batch());
    }

    let views: Vec<_> = per_class_tracks.iter().map(Array2::view).collect();
    concatenate(Axis(0), &views).map_err(|_| Error::InvalidTrackRow {
        got: views
            .iter()
            .map(|v| v.ncols())
            .find(|&cols| cols != TRACK_COLS)
            .unwrap_or(TRACK_COLS),
    })
}
