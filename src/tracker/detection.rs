//! Detection records and the row layout of detection batches.

use ndarray::{Array2, ArrayView1};

use crate::error::{Error, Result};
use crate::tracker::rect::Rect;

/// Minimum column count of a detection batch: `x1, y1, x2, y2, conf, cls`.
pub const DET_COLS: usize = 6;

/// Column holding the class id of a detection row.
pub const CLASS_COL: usize = 5;

/// Single detection input for a tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in TLBR format (x1, y1, x2, y2)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Object class id
    pub class_id: usize,
}

impl Detection {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, score: f32, class_id: usize) -> Self {
        Self {
            bbox: Rect::from_tlbr(x1, y1, x2, y2),
            score,
            class_id,
        }
    }

    pub fn from_rect(bbox: Rect, score: f32, class_id: usize) -> Self {
        Self {
            bbox,
            score,
            class_id,
        }
    }

    /// Decode a detection from a batch row. Extra trailing columns are ignored.
    pub fn from_row(row: ArrayView1<'_, f32>) -> Result<Self> {
        if row.len() < DET_COLS {
            return Err(Error::InvalidShape {
                expected: DET_COLS,
                got: row.len(),
            });
        }
        Ok(Self {
            bbox: Rect::from_tlbr(row[0], row[1], row[2], row[3]),
            score: row[4],
            class_id: class_value(row[CLASS_COL])?,
        })
    }

    /// Encode as a `[x1, y1, x2, y2, conf, cls]` row.
    pub fn to_row(&self) -> [f32; DET_COLS] {
        let [x1, y1, x2, y2] = self.bbox.to_tlbr();
        [x1, y1, x2, y2, self.score, self.class_id as f32]
    }
}

/// Stack detections into an `(n, 6)` batch.
pub fn detections_to_batch(detections: &[Detection]) -> Array2<f32> {
    let mut batch = Array2::zeros((detections.len(), DET_COLS));
    for (mut row, det) in batch.rows_mut().into_iter().zip(detections) {
        for (cell, value) in row.iter_mut().zip(det.to_row()) {
            *cell = value;
        }
    }
    batch
}

/// Read the class id of a detection row, checking it against `num_classes`.
pub fn class_of(row: ArrayView1<'_, f32>, num_classes: usize) -> Result<usize> {
    if row.len() <= CLASS_COL {
        return Err(Error::InvalidShape {
            expected: DET_COLS,
            got: row.len(),
        });
    }
    let class_id = class_value(row[CLASS_COL])?;
    if class_id >= num_classes {
        return Err(Error::ClassOutOfRange {
            class_id,
            num_classes,
        });
    }
    Ok(class_id)
}

fn class_value(value: f32) -> Result<usize> {
    whole_number(value).ok_or(Error::InvalidClass { value })
}

/// `value` as an index, if it is a finite non-negative integer that fits.
pub(crate) fn whole_number(value: f32) -> Option<usize> {
    if !value.is_finite()
        || value < 0.0
        || value.fract() != 0.0
        || value >= usize::MAX as f32
    {
        return None;
    }
    Some(value as usize)
}
