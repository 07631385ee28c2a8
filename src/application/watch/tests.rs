//! Tests for the watch module

use super::event::{WatchOptions, WatcherState, DEBOUNCE_MS};
use super::use_case::WatchUseCase;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::domain::ports::{BundleEvent, RecordingEventSink, Severity};
use crate::domain::value_objects::ProjectLayout;
use crate::infrastructure::fs::MemoryFs;
use crate::infrastructure::notify::RecordingNotifier;

fn layout() -> ProjectLayout {
    ProjectLayout::conventional(Path::new("/w"), "demo")
}

// === WatcherState tests ===

#[test]
fn test_watcher_state_debouncing() {
    let mut state = WatcherState::default();

    // No changes yet
    assert!(!state.should_sync());

    state.add_change(PathBuf::from("GLOBALS/a.js"));

    // Should not sync immediately (debounce)
    assert!(!state.should_sync());

    thread::sleep(Duration::from_millis(DEBOUNCE_MS + 10));
    assert!(state.should_sync());

    let changes = state.take_changes(Path::new("index.js"));
    assert_eq!(changes.len(), 1);

    // No more pending
    assert!(!state.should_sync());
    assert!(!state.has_pending());
}

#[test]
fn test_watcher_state_coalesce_changes() {
    let mut state = WatcherState::new(Duration::ZERO);

    state.add_change(PathBuf::from("GLOBALS/a.js"));
    state.add_change(PathBuf::from("GLOBALS/a.js"));
    state.add_change(PathBuf::from("GLOBALS/a.js"));

    let changes = state.take_changes(Path::new("index.js"));
    assert_eq!(changes.len(), 1);
}

#[test]
fn test_watcher_state_index_first_then_path_order() {
    let mut state = WatcherState::new(Duration::ZERO);

    state.add_change(PathBuf::from("b.js"));
    state.add_change(PathBuf::from("z/index.js"));
    state.add_change(PathBuf::from("a.js"));

    let changes = state.take_changes(Path::new("z/index.js"));
    assert_eq!(
        changes,
        vec![
            PathBuf::from("z/index.js"),
            PathBuf::from("a.js"),
            PathBuf::from("b.js"),
        ]
    );
}

#[test]
fn test_watch_options_builder() {
    let options = WatchOptions::new(layout())
        .with_poll_interval(Duration::from_millis(200))
        .with_debounce(Duration::from_millis(5));

    assert_eq!(options.poll_interval, Duration::from_millis(200));
    assert_eq!(options.debounce, Duration::from_millis(5));
    assert_eq!(options.layout.project, "demo");
}

// === WatchUseCase tests ===

#[test]
fn test_watch_initial_build_then_shutdown() {
    let fs = MemoryFs::new()
        .with_file("/w/PROJECTS/demo/index.js", "const x = 1;\n")
        .with_file("/w/GLOBALS/utils.js", "u();\n");
    let (_tx, rx) = channel();
    let sink = Arc::new(RecordingEventSink::new());
    let running = Arc::new(AtomicBool::new(false)); // Stop immediately

    let use_case = WatchUseCase::new(WatchOptions::new(layout()));
    use_case
        .run(fs.clone(), RecordingNotifier::new(), rx, running, sink.clone())
        .unwrap();

    let events = sink.events();
    assert!(matches!(events.first(), Some(BundleEvent::Started { .. })));
    assert!(matches!(events.last(), Some(BundleEvent::Shutdown)));
    assert_eq!(
        fs.get("/w/BUNDLES/demo.idjs").as_deref(),
        Some("const x = 1;\n")
    );
}

#[test]
fn test_watch_missing_index_is_fatal() {
    let (_tx, rx) = channel();
    let sink = Arc::new(RecordingEventSink::new());
    let running = Arc::new(AtomicBool::new(true));

    let use_case = WatchUseCase::new(WatchOptions::new(layout()));
    let result = use_case.run(MemoryFs::new(), RecordingNotifier::new(), rx, running, sink.clone());

    assert!(result.is_err());
    assert_eq!(sink.count(Severity::Fatal), 1);
}

#[test]
fn test_watch_rebuilds_on_fragment_change() {
    let fs = MemoryFs::new()
        .with_file(
            "/w/PROJECTS/demo/index.js",
            "/* AUAUST\n * useGlobal utils\n */\nmain();\n",
        )
        .with_file("/w/GLOBALS/utils.js", "one();\n");
    let (tx, rx) = channel();
    let sink = Arc::new(RecordingEventSink::new());
    let running = Arc::new(AtomicBool::new(true));

    let options = WatchOptions::new(layout()).with_debounce(Duration::ZERO);
    let use_case = WatchUseCase::new(options);

    let handle = {
        let fs = fs.clone();
        let running = running.clone();
        let sink = sink.clone();
        thread::spawn(move || use_case.run(fs, RecordingNotifier::new(), rx, running, sink))
    };

    thread::sleep(Duration::from_millis(100));
    fs.insert("/w/GLOBALS/utils.js", "two();\n");
    tx.send(PathBuf::from("/w/GLOBALS/utils.js")).unwrap();
    thread::sleep(Duration::from_millis(300));
    running.store(false, Ordering::SeqCst);
    handle.join().unwrap().unwrap();

    assert_eq!(
        fs.get("/w/BUNDLES/demo.idjs").as_deref(),
        Some("two();\nmain();\n")
    );
    let written = sink
        .events()
        .iter()
        .filter(|e| matches!(e, BundleEvent::BundleWritten { .. }))
        .count();
    assert_eq!(written, 2);
}

#[test]
fn test_watch_stops_when_notifier_goes_away() {
    let fs = MemoryFs::new().with_file("/w/PROJECTS/demo/index.js", "x();\n");
    let (tx, rx) = channel::<PathBuf>();
    drop(tx);
    let sink = Arc::new(RecordingEventSink::new());
    let running = Arc::new(AtomicBool::new(true));

    let use_case = WatchUseCase::new(WatchOptions::new(layout()));
    use_case
        .run(fs, RecordingNotifier::new(), rx, running, sink.clone())
        .unwrap();

    assert!(matches!(sink.events().last(), Some(BundleEvent::Shutdown)));
}

#[test]
fn test_watch_flushes_pending_changes_when_notifier_goes_away() {
    let fs = MemoryFs::new()
        .with_file(
            "/w/PROJECTS/demo/index.js",
            "/* AUAUST\n * useGlobal utils\n */\nmain();\n",
        )
        .with_file("/w/GLOBALS/utils.js", "one();\n");
    let (tx, rx) = channel();
    let sink = Arc::new(RecordingEventSink::new());
    let running = Arc::new(AtomicBool::new(true));

    let options = WatchOptions::new(layout()).with_debounce(Duration::from_secs(30));
    let use_case = WatchUseCase::new(options);

    let handle = {
        let fs = fs.clone();
        let sink = sink.clone();
        thread::spawn(move || use_case.run(fs, RecordingNotifier::new(), rx, running, sink))
    };

    thread::sleep(Duration::from_millis(100));
    fs.insert("/w/GLOBALS/utils.js", "two();\n");
    tx.send(PathBuf::from("/w/GLOBALS/utils.js")).unwrap();
    drop(tx);

    // Returns without waiting out the 30 s quiet period.
    let started = std::time::Instant::now();
    handle.join().unwrap().unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));

    assert_eq!(
        fs.get("/w/BUNDLES/demo.idjs").as_deref(),
        Some("two();\nmain();\n")
    );
    assert!(matches!(sink.events().last(), Some(BundleEvent::Shutdown)));
}
