//! Console event sink
//!
//! Human-readable rendering of bundle events. Warnings and errors go to
//! stderr, everything else to stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use auaust::domain::ports::{BundleEvent, BundleEventSink, Severity};

use crate::ui::context::UiContext;
use crate::ui::views::watch::{render_bundle_event, timestamp_now};

pub struct ConsoleEventSink {
    ui: UiContext,
    out: Mutex<Box<dyn Write + Send>>,
    err: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self::with_writers(ui, io::stdout(), io::stderr())
    }

    pub fn with_writers<O, E>(ui: UiContext, out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            ui,
            out: Mutex::new(Box::new(out)),
            err: Mutex::new(Box::new(err)),
        }
    }

    /// Bookkeeping events only shown with `-v`
    fn is_detail(event: &BundleEvent) -> bool {
        matches!(
            event,
            BundleEvent::IndexLoaded { .. }
                | BundleEvent::WatchAdded { .. }
                | BundleEvent::WatchRemoved { .. }
        )
    }
}

impl BundleEventSink for ConsoleEventSink {
    fn on_event(&self, event: BundleEvent) {
        if self.ui.verbose == 0 && Self::is_detail(&event) {
            return;
        }

        let rendered = render_bundle_event(&timestamp_now(), &event, self.ui.color, self.ui.unicode);
        let target = match event.severity() {
            Severity::Info => &self.out,
            Severity::Warning | Severity::Error | Severity::Fatal => &self.err,
        };
        if let Ok(mut writer) = target.lock() {
            let _ = writer.write_all(rendered.as_bytes());
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn ui(verbose: u8) -> UiContext {
        UiContext {
            json: false,
            verbose,
            caps: TerminalCapabilities {
                is_tty: false,
                supports_color: false,
                supports_unicode: false,
                is_ci: false,
                width: 80,
            },
            color: false,
            unicode: false,
        }
    }

    #[test]
    fn errors_go_to_stderr() {
        let (out, err) = (SharedBuf::default(), SharedBuf::default());
        let sink = ConsoleEventSink::with_writers(ui(0), out.clone(), err.clone());

        sink.on_event(BundleEvent::FragmentUnreadable {
            path: PathBuf::from("GLOBALS/x.js"),
            reason: "no such file".to_string(),
        });
        sink.on_event(BundleEvent::Shutdown);

        assert!(err.text().contains(" ERR "));
        assert!(out.text().contains("Watch stopped."));
        assert!(!out.text().contains(" ERR "));
    }

    #[test]
    fn detail_events_need_verbose() {
        let (out, err) = (SharedBuf::default(), SharedBuf::default());
        let quiet = ConsoleEventSink::with_writers(ui(0), out.clone(), err.clone());
        quiet.on_event(BundleEvent::WatchAdded {
            path: PathBuf::from("GLOBALS/x.js"),
        });
        assert!(out.text().is_empty());

        let verbose = ConsoleEventSink::with_writers(ui(1), out.clone(), err);
        verbose.on_event(BundleEvent::WatchAdded {
            path: PathBuf::from("GLOBALS/x.js"),
        });
        assert!(out.text().contains("Started watching GLOBALS/x.js."));
    }
}
