use anyhow::{Context, Result};
use auaust::domain::services::parse_index;

use crate::cli::Cli;
use crate::commands::project::{print_config_warnings, Workspace};
use crate::commands::{event_sink, report_fatal};
use crate::ui::context::UiContext;
use crate::ui::views::parse::{render_parse_header, render_parse_outcome};

pub fn cmd_parse(cli: &Cli) -> Result<()> {
    let workspace = Workspace::load(cli);
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &workspace.config);
    print_config_warnings(&workspace.warnings, &ui);

    let layout = match workspace.config.layout(&workspace.root) {
        Ok(layout) => layout,
        Err(err) => return Err(report_fatal(&event_sink(&ui, "parse"), err)),
    };

    let text = std::fs::read_to_string(&layout.index)
        .with_context(|| format!("could not read the index at {}", layout.index.display()))?;
    let outcome = parse_index(&text);

    if ui.json {
        crate::ui::json::emit(&serde_json::json!({
            "event": "complete",
            "command": "parse",
            "index": layout.index,
            "data": outcome,
        }))?;
    } else {
        print!("{}", render_parse_header(&layout, ui.color, ui.unicode));
        println!();
        print!(
            "{}",
            render_parse_outcome(&outcome, ui.color, ui.unicode, ui.caps.width)
        );
    }
    Ok(())
}
