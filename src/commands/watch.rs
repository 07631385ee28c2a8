use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use auaust::application::{WatchOptions, WatchUseCase};
use auaust::domain::ports::BundleEventSink;

use crate::cli::Cli;
use crate::commands::project::{print_config_warnings, Workspace};
use crate::commands::{already_reported, event_sink, report_fatal};
use crate::ui::context::UiContext;

pub fn cmd_watch(cli: &Cli, poll_interval: Option<u64>, debounce: Option<u64>) -> Result<()> {
    let mut workspace = Workspace::load(cli);
    if let Some(ms) = poll_interval {
        workspace.config.watch.poll_interval_ms = ms;
    }
    if let Some(ms) = debounce {
        workspace.config.watch.debounce_ms = ms;
    }

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &workspace.config);
    print_config_warnings(&workspace.warnings, &ui);
    let sink: Arc<dyn BundleEventSink> = event_sink(&ui, "watch");

    let layout = match workspace.config.layout(&workspace.root) {
        Ok(layout) => layout,
        Err(err) => return Err(report_fatal(&sink, err)),
    };

    let options = WatchOptions::new(layout)
        .with_poll_interval(workspace.config.poll_interval())
        .with_debounce(workspace.config.debounce());

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::watch::render_watch_header(
                &options.layout,
                duration_ms(options.poll_interval),
                ui.color,
                ui.unicode
            )
        );
    }

    WatchUseCase::new(options)
        .start(running, sink)
        .map_err(already_reported)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
