use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis, array, concatenate};
use perclass_track::tracker::{TRACK_COLS, empty_track_batch, track_records};
use perclass_track::{
    ActiveTracks, Error, PerClassConfig, PerClassDispatcher, PerClassTracker, UpdateTracks,
};

/// One recorded call to the mock update.
#[derive(Debug, Clone, PartialEq)]
struct Call {
    detections: Array2<f32>,
    active_on_entry: Vec<u32>,
}

/// Appends `id` and `det_ind` columns to its input and grows its active list
/// by one track per detection, numbering from the list it was handed.
#[derive(Default)]
struct RecordingTracker {
    active_tracks: Vec<u32>,
    calls: Vec<Call>,
    silent: bool,
}

impl UpdateTracks for RecordingTracker {
    type Error = Error;

    fn update(
        &mut self,
        detections: ArrayView2<'_, f32>,
        _image: ArrayView3<'_, u8>,
    ) -> Result<Array2<f32>, Error> {
        self.calls.push(Call {
            detections: detections.to_owned(),
            active_on_entry: self.active_tracks.clone(),
        });

        if self.silent || detections.is_empty() {
            return Ok(empty_track_batch());
        }

        let mut extra = Array2::zeros((detections.nrows(), 2));
        for i in 0..detections.nrows() {
            let id = self.active_tracks.len() as u32 + 1;
            self.active_tracks.push(id);
            extra[[i, 0]] = id as f32;
            extra[[i, 1]] = i as f32;
        }
        Ok(concatenate(Axis(1), &[detections.view(), extra.view()]).unwrap())
    }
}

impl ActiveTracks for RecordingTracker {
    type Track = u32;

    fn take_active_tracks(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.active_tracks)
    }

    fn set_active_tracks(&mut self, tracks: Vec<u32>) {
        self.active_tracks = tracks;
    }
}

fn frame() -> Array3<u8> {
    Array3::zeros((32, 32, 3))
}

fn partitioned() -> PerClassTracker<RecordingTracker> {
    PerClassTracker::new(
        RecordingTracker::default(),
        PerClassConfig {
            per_class: true,
            num_classes: 80,
        },
    )
}

#[test]
fn test_two_classes_one_frame() {
    let mut tracker = partitioned();
    let dets = array![
        [0.0, 0.0, 10.0, 10.0, 0.9, 3.0],
        [5.0, 5.0, 15.0, 15.0, 0.8, 3.0],
        [1.0, 1.0, 2.0, 2.0, 0.95, 7.0],
    ];

    let out = tracker.update(dets.view(), frame().view()).unwrap();

    let calls = &tracker.tracker().calls;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].detections.nrows(), 2);
    assert!(calls[0].detections.column(5).iter().all(|&c| c == 3.0));
    assert_eq!(calls[1].detections.nrows(), 1);
    assert_eq!(calls[1].detections[[0, 5]], 7.0);

    assert_eq!(out.dim(), (3, TRACK_COLS));
    assert_eq!(out.column(5).to_vec(), vec![3.0, 3.0, 7.0]);
    assert_eq!(out.row(2).to_vec(), vec![1.0, 1.0, 2.0, 2.0, 0.95, 7.0, 1.0, 0.0]);
}

#[test]
fn test_classes_visited_in_ascending_order() {
    let mut tracker = partitioned();
    let dets = array![
        [0.0, 0.0, 1.0, 1.0, 0.9, 42.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 0.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 79.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 5.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 42.0],
    ];

    let out = tracker.update(dets.view(), frame().view()).unwrap();

    let visited: Vec<f32> = tracker
        .tracker()
        .calls
        .iter()
        .map(|c| c.detections[[0, 5]])
        .collect();
    assert_eq!(visited, vec![0.0, 5.0, 42.0, 79.0]);
    assert_eq!(out.column(5).to_vec(), vec![0.0, 5.0, 42.0, 42.0, 79.0]);
}

#[test]
fn test_output_rows_sum_over_classes() {
    let mut tracker = partitioned();
    let dets = array![
        [0.0, 0.0, 1.0, 1.0, 0.9, 1.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 2.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 2.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 2.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 9.0],
    ];

    let out = tracker.update(dets.view(), frame().view()).unwrap();

    let per_class: usize = tracker
        .tracker()
        .calls
        .iter()
        .map(|c| c.detections.nrows())
        .sum();
    assert_eq!(out.nrows(), per_class);
    assert_eq!(track_records(&out).unwrap().len(), 5);
}

#[test]
fn test_state_persists_between_frames() {
    let mut tracker = partitioned();
    let first = array![
        [0.0, 0.0, 1.0, 1.0, 0.9, 3.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 3.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 7.0],
    ];
    let second = array![[0.0, 0.0, 1.0, 1.0, 0.9, 3.0]];
    let third = array![[0.0, 0.0, 1.0, 1.0, 0.9, 7.0]];

    tracker.update(first.view(), frame().view()).unwrap();
    tracker.update(second.view(), frame().view()).unwrap();
    let out = tracker.update(third.view(), frame().view()).unwrap();

    let calls = &tracker.tracker().calls;
    assert_eq!(calls.len(), 4);
    // Frame 2 sees exactly what class 3 left behind in frame 1.
    assert_eq!(calls[2].active_on_entry, vec![1, 2]);
    // Class 7 was absent in frame 2 and resumes from its frame-1 state.
    assert_eq!(calls[3].active_on_entry, vec![1]);
    assert_eq!(out[[0, 6]], 2.0);

    let buckets = tracker.per_class_active_tracks();
    assert_eq!(buckets[3], vec![1, 2, 3]);
    assert_eq!(buckets[7], vec![1, 2]);
    assert!(tracker.tracker().active_tracks.is_empty());
}

#[test]
fn test_empty_batch_passes_through() {
    let mut tracker = partitioned();
    let dets = Array2::<f32>::zeros((0, 6));

    let out = tracker.update(dets.view(), frame().view()).unwrap();

    assert_eq!(out, empty_track_batch());
    let calls = &tracker.tracker().calls;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].detections.dim(), (0, 6));
    assert!(tracker.per_class_active_tracks().iter().all(Vec::is_empty));
}

#[test]
fn test_disabled_partitioning_is_plain_update() {
    let dets = array![
        [0.0, 0.0, 10.0, 10.0, 0.9, 7.0],
        [5.0, 5.0, 15.0, 15.0, 0.8, 3.0],
    ];

    let mut direct = RecordingTracker::default();
    let expected = direct.update(dets.view(), frame().view()).unwrap();

    let mut wrapped = PerClassTracker::new(RecordingTracker::default(), PerClassConfig::default());
    let out = wrapped.update(dets.view(), frame().view()).unwrap();

    assert_eq!(out, expected);
    assert_eq!(wrapped.tracker().calls, direct.calls);
    assert_eq!(wrapped.tracker().active_tracks, vec![1, 2]);
}

#[test]
fn test_no_tracks_gives_empty_batch() {
    let mut tracker = PerClassTracker::new(
        RecordingTracker {
            silent: true,
            ..Default::default()
        },
        PerClassConfig {
            per_class: true,
            ..Default::default()
        },
    );
    let dets = array![
        [0.0, 0.0, 1.0, 1.0, 0.9, 1.0],
        [0.0, 0.0, 1.0, 1.0, 0.9, 2.0],
    ];

    let out = tracker.update(dets.view(), frame().view()).unwrap();

    assert_eq!(out.dim(), (0, TRACK_COLS));
    assert_eq!(tracker.tracker().calls.len(), 2);
}

#[test]
fn test_class_outside_range_is_rejected() {
    let mut dispatcher = PerClassDispatcher::new(10);
    let mut tracker = RecordingTracker::default();
    let dets = array![[0.0, 0.0, 1.0, 1.0, 0.9, 12.0]];

    let err = dispatcher
        .invoke(&mut tracker, dets.view(), frame().view())
        .unwrap_err();

    assert_eq!(
        err,
        Error::ClassOutOfRange {
            class_id: 12,
            num_classes: 10
        }
    );
    assert!(tracker.calls.is_empty());
}
