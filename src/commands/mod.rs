//! Command handlers for the `auaust` binary

pub mod build;
pub mod parse;
pub mod project;
pub mod watch;

use std::sync::Arc;

use auaust::domain::ports::{BundleEvent, BundleEventSink};
use auaust::infrastructure::JsonEventSink;

use crate::ui::context::UiContext;
use crate::ui::sink::ConsoleEventSink;

/// Event sink for the selected output mode
pub(crate) fn event_sink(ui: &UiContext, command: &'static str) -> Arc<dyn BundleEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::new(*ui))
    }
}

/// Log a setup failure as `Fatal` and turn it into the command's error
pub(crate) fn report_fatal(
    sink: &Arc<dyn BundleEventSink>,
    err: auaust::BundlerError,
) -> anyhow::Error {
    sink.on_event(BundleEvent::Fatal {
        message: err.to_string(),
    });
    already_reported(err)
}

/// Wrap an error whose `Fatal` event has already been emitted
pub(crate) fn already_reported(err: auaust::BundlerError) -> anyhow::Error {
    anyhow::Error::new(err).context(REPORTED)
}

/// Whether `main` should stay quiet about this error
pub(crate) fn is_reported(err: &anyhow::Error) -> bool {
    err.to_string() == REPORTED
}

/// Context marker for errors that were already shown to the user
pub(crate) const REPORTED: &str = "already reported";
