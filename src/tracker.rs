mod detection;
mod dispatcher;
mod per_class_tracker;
mod rect;
mod track_record;

pub use detection::{CLASS_COL, DET_COLS, Detection, class_of, detections_to_batch};
pub use dispatcher::{
    ActiveTracks, DEFAULT_NUM_CLASSES, PerClassDispatcher, UpdateTracks, partition_by_class,
};
pub use per_class_tracker::{PerClassConfig, PerClassTracker};
pub use rect::Rect;
pub use track_record::{TRACK_COLS, TrackRecord, empty_track_batch, track_records};
