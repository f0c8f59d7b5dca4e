//! Track records and the row layout of track batches.

use ndarray::{Array2, ArrayView1};

use crate::error::{Error, Result};
use crate::tracker::detection::whole_number;
use crate::tracker::rect::Rect;

/// Column count of every track batch:
/// `x1, y1, x2, y2, id, conf, cls, det_ind`.
pub const TRACK_COLS: usize = 8;

/// An empty track batch, shape `(0, 8)`.
pub fn empty_track_batch() -> Array2<f32> {
    Array2::zeros((0, TRACK_COLS))
}

/// One decoded row of a track batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    /// Current bounding box
    pub bbox: Rect,
    /// Track identity
    pub track_id: u64,
    /// Confidence of the last matched detection
    pub score: f32,
    /// Object class id
    pub class_id: usize,
    /// Index of the matched detection within the batch passed to the tracker
    pub det_index: usize,
}

impl TrackRecord {
    pub fn from_row(row: ArrayView1<'_, f32>) -> Result<Self> {
        if row.len() != TRACK_COLS {
            return Err(Error::InvalidTrackRow { got: row.len() });
        }
        Ok(Self {
            bbox: Rect::from_tlbr(row[0], row[1], row[2], row[3]),
            track_id: index_column(row, 4)? as u64,
            score: row[5],
            class_id: index_column(row, 6)?,
            det_index: index_column(row, 7)?,
        })
    }

    pub fn to_row(&self) -> [f32; TRACK_COLS] {
        let [x1, y1, x2, y2] = self.bbox.to_tlbr();
        [
            x1,
            y1,
            x2,
            y2,
            self.track_id as f32,
            self.score,
            self.class_id as f32,
            self.det_index as f32,
        ]
    }
}

fn index_column(row: ArrayView1<'_, f32>, column: usize) -> Result<usize> {
    let value = row[column];
    whole_number(value).ok_or(Error::InvalidTrackValue { column, value })
}

/// Decode every row of a track batch.
pub fn track_records(tracks: &Array2<f32>) -> Result<Vec<TrackRecord>> {
    if tracks.ncols() != TRACK_COLS {
        return Err(Error::InvalidTrackRow { got: tracks.ncols() });
    }
    tracks.rows().into_iter().map(TrackRecord::from_row).collect()
}
