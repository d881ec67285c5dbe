//! Progress and cancellation integration tests.

mod common;

use std::{
    fs,
    sync::{Arc, Mutex},
    time::Duration,
};

use keyframes::{
    CancellationToken, ExtractOptions, ProgressCallback, ProgressInfo,
    extract_keyframes_with_options,
};

use common::{FRAME_DELAY_MS, write_gif};

// ── CancellationToken ──────────────────────────────────────────────

#[test]
fn cancellation_token_default_not_cancelled() {
    let token = CancellationToken::default();
    assert!(!token.is_cancelled());
}

#[test]
fn cancellation_token_clone_shares_state() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();
    assert!(clone.is_cancelled());
}

// ── ProgressInfo ───────────────────────────────────────────────────

#[derive(Default)]
struct RecordingProgress {
    infos: Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

fn run_with(batch_size: u64, recorder: Arc<RecordingProgress>) {
    let directory = tempfile::tempdir().unwrap();
    let source = directory.path().join("source.gif");
    write_gif(&source, 12);
    fs::create_dir(directory.path().join("p")).unwrap();

    let options = ExtractOptions::new()
        .with_output_root(directory.path())
        .with_progress(recorder)
        .with_batch_size(batch_size);
    extract_keyframes_with_options(&source, 4, "p", &options).expect("Extraction failed");
}

#[test]
fn progress_reports_every_frame_and_a_final_snapshot() {
    let recorder = Arc::new(RecordingProgress::default());
    run_with(1, recorder.clone());

    let infos = recorder.infos.lock().unwrap();
    assert_eq!(infos.len(), 5);

    let frames: Vec<Option<u64>> = infos.iter().map(|info| info.current_frame).collect();
    assert_eq!(frames, vec![Some(0), Some(3), Some(6), Some(9), None]);

    assert_eq!(
        infos[1].current_timestamp,
        Some(Duration::from_millis(u64::from(FRAME_DELAY_MS) * 3))
    );

    let last = infos.last().unwrap();
    assert_eq!(last.current, 4);
    assert_eq!(last.total, 4);
    assert_eq!(last.percentage, Some(100.0));
}

#[test]
fn progress_batches() {
    let recorder = Arc::new(RecordingProgress::default());
    run_with(3, recorder.clone());

    let infos = recorder.infos.lock().unwrap();
    // One batched report after the third frame, then the final one.
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].current, 3);
    assert_eq!(infos[0].current_frame, Some(6));
}
