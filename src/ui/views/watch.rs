use auaust::domain::ports::{BundleEvent, Severity};
use auaust::domain::value_objects::ProjectLayout;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{ColoredText, Tone};

/// Tag that starts every log line
pub const LOG_TAG: &str = "AUAUST";

/// `YYYYMMDD-HHMMSS` in local time
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y%m%d-%H%M%S").to_string()
}

pub fn render_watch_header(
    layout: &ProjectLayout,
    poll_interval_ms: u64,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Watch, "auaust watch");
    header.add("Project", layout.project.as_str());
    header.add("Index", layout.index.display().to_string());
    header.add("Bundle", layout.bundle.display().to_string());
    header.add("Polling", format!("every {}ms", poll_interval_ms));
    header.add("Hint", "Press Ctrl+C to stop");
    header.render(supports_color, supports_unicode)
}

pub fn render_build_header(
    layout: &ProjectLayout,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, "auaust build");
    header.add("Project", layout.project.as_str());
    header.add("Index", layout.index.display().to_string());
    header.add("Bundle", layout.bundle.display().to_string());
    header.render(supports_color, supports_unicode)
}

fn label(event: &BundleEvent) -> (&'static str, Tone) {
    match (event.severity(), event) {
        (_, BundleEvent::BundleWritten { .. }) => ("NEW", Tone::Update),
        (Severity::Info, _) => ("OK!", Tone::Success),
        (Severity::Warning, _) => ("WRN", Tone::Warning),
        (Severity::Error, _) => ("ERR", Tone::Error),
        (Severity::Fatal, _) => ("FATAL", Tone::Error),
    }
}

/// Render one event as log lines, each prefixed with tag, time and label
pub fn render_bundle_event(
    timestamp: &str,
    event: &BundleEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let (text, tone) = label(event);
    let prefix = format!(
        "{} {} {}",
        ColoredText::new(LOG_TAG, Tone::Tag).render(supports_color),
        ColoredText::dim(timestamp).render(supports_color),
        ColoredText::new(text, tone).bold().render(supports_color),
    );

    let icon = match event {
        BundleEvent::FragmentChanged { .. } => Some(Icon::Arrow),
        BundleEvent::BundleWritten { .. } => Some(Icon::Success),
        BundleEvent::BundleWriteFailed { .. } => Some(Icon::Error),
        BundleEvent::Shutdown => Some(Icon::Watch),
        _ => None,
    };
    let message = match icon {
        Some(icon) => format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            event.message()
        ),
        None => event.message(),
    };

    let mut out = String::new();
    for line in message.lines() {
        out.push_str(&prefix);
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
    out
}
