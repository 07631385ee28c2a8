use anyhow::Result;
use auaust::application::Bundler;
use auaust::domain::ports::NoopNotifier;
use auaust::infrastructure::LocalFs;

use crate::cli::Cli;
use crate::commands::project::{print_config_warnings, Workspace};
use crate::commands::{event_sink, report_fatal};
use crate::ui::context::UiContext;

/// Build the bundle once; the error carries the exit status
pub fn cmd_build(cli: &Cli) -> Result<()> {
    let workspace = Workspace::load(cli);
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &workspace.config);
    print_config_warnings(&workspace.warnings, &ui);
    let sink = event_sink(&ui, "build");

    let layout = match workspace.config.layout(&workspace.root) {
        Ok(layout) => layout,
        Err(err) => return Err(report_fatal(&sink, err)),
    };

    if !ui.json {
        print!(
            "{}",
            crate::ui::views::watch::render_build_header(&layout, ui.color, ui.unicode)
        );
    }

    let bundler = match Bundler::start(layout, LocalFs::new(), NoopNotifier, sink.clone()) {
        Ok(bundler) => bundler,
        Err(err) => return Err(report_fatal(&sink, err)),
    };

    if !bundler.last_report().written {
        anyhow::bail!(
            "bundle was not written to {}",
            bundler.layout().bundle.display()
        );
    }
    Ok(())
}
