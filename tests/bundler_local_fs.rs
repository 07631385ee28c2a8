//! Bundler driven against the real file system with a recording notifier.

mod common;

use std::sync::Arc;

use auaust::domain::ports::{BundleEvent, RecordingEventSink, Severity};
use auaust::infrastructure::{LocalFs, RecordingNotifier};
use auaust::{Bundler, FragmentId};

use common::{TestEnv, EXAMPLE_INDEX};

fn start(env: &TestEnv) -> (Bundler<LocalFs, RecordingNotifier>, Arc<RecordingEventSink>) {
    let sink = Arc::new(RecordingEventSink::new());
    let bundler = Bundler::start(
        env.layout(),
        LocalFs::new(),
        RecordingNotifier::new(),
        sink.clone(),
    )
    .unwrap();
    (bundler, sink)
}

#[test]
fn builds_bundle_on_disk() {
    let env = TestEnv::new();
    env.write_index(EXAMPLE_INDEX);
    env.write_global("utils", "U\n");
    env.write_local("helpers", "H\n");

    let (bundler, sink) = start(&env);

    assert_eq!(env.read_bundle().as_deref(), Some("U\nconst x=1;\nH\n"));
    assert!(bundler.last_report().written);
    assert_eq!(sink.count(Severity::Error), 0);

    let notifier = bundler.notifier();
    assert!(notifier.is_subscribed(env.layout().index));
    assert!(notifier.is_subscribed(env.path("GLOBALS/utils.js")));
    assert!(notifier.is_subscribed(env.path("PROJECTS/demo/IMPORTS/helpers.js")));
}

#[test]
fn creates_the_bundles_directory() {
    let env = TestEnv::new();
    env.write_index("plain();\n");

    start(&env);

    assert!(env.path("BUNDLES").is_dir());
    assert_eq!(env.read_bundle().as_deref(), Some("plain();\n"));
}

#[test]
fn fragment_edit_is_picked_up_after_notification() {
    let env = TestEnv::new();
    env.write_index(EXAMPLE_INDEX);
    env.write_global("utils", "U\n");
    env.write_local("helpers", "H\n");
    let (mut bundler, _sink) = start(&env);

    env.write_global("utils", "// header\nU2\n");
    // Without a notification the cached content is still used.
    bundler.rebuild(auaust::domain::ports::ChangeSource::Index);
    assert_eq!(env.read_bundle().as_deref(), Some("U\nconst x=1;\nH\n"));

    let report = bundler.handle_change(&env.path("GLOBALS/utils.js")).unwrap();
    assert!(report.written);
    assert_eq!(env.read_bundle().as_deref(), Some("U2\nconst x=1;\nH\n"));
}

#[test]
fn missing_fragment_becomes_placeholder_then_recovers() {
    let env = TestEnv::new();
    env.write_index("/* AUAUST\n * useGlobal late\n */\nmain();\n");
    let (mut bundler, sink) = start(&env);

    let bundle = env.read_bundle().unwrap();
    assert!(bundle.starts_with("/* File "));
    assert!(bundle.contains("late.js wasn't found"));
    assert!(bundle.ends_with("main();\n"));
    assert!(!bundler.store().is_cached(&FragmentId::global("late")));
    assert_eq!(sink.count(Severity::Error), 1);

    env.write_global("late", "late();\n");
    bundler.handle_change(&env.path("GLOBALS/late.js")).unwrap();
    assert_eq!(env.read_bundle().as_deref(), Some("late();\nmain();\n"));
}

#[test]
fn index_edit_drops_unreferenced_fragments() {
    let env = TestEnv::new();
    env.write_index(EXAMPLE_INDEX);
    env.write_global("utils", "U\n");
    env.write_local("helpers", "H\n");
    let (mut bundler, sink) = start(&env);

    env.write_index("/* AUAUST\n * useGlobal utils\n */\nconst y=2;\n");
    bundler.handle_change(&env.layout().index).unwrap();

    assert_eq!(env.read_bundle().as_deref(), Some("U\nconst y=2;\n"));
    let helpers = FragmentId::local("helpers");
    assert!(!bundler.watches().is_watched(&helpers));
    assert!(!bundler.store().is_cached(&helpers));
    assert!(!bundler
        .notifier()
        .is_subscribed(env.path("PROJECTS/demo/IMPORTS/helpers.js")));
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, BundleEvent::WatchRemoved { .. })));
}

#[test]
fn missing_index_is_fatal() {
    let env = TestEnv::new();
    let sink = Arc::new(RecordingEventSink::new());

    let err = Bundler::start(
        env.layout(),
        LocalFs::new(),
        RecordingNotifier::new(),
        sink,
    )
    .err()
    .unwrap();

    assert!(matches!(err, auaust::BundlerError::IndexUnreadable { .. }));
    assert!(env.read_bundle().is_none());
}
