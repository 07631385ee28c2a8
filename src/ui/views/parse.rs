use auaust::domain::entities::Segment;
use auaust::domain::services::ParseOutcome;
use auaust::domain::value_objects::{FragmentKind, ProjectLayout};
use unicode_width::UnicodeWidthChar;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{ColoredText, Tone};

const SECTIONS: [&str; 4] = ["top of file", "before body", "body", "after body"];

pub fn render_parse_header(
    layout: &ProjectLayout,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Parse, "auaust parse");
    header.add("Project", layout.project.as_str());
    header.add("Index", layout.index.display().to_string());
    header.render(supports_color, supports_unicode)
}

/// Render the structure of a parsed index, one segment per line
pub fn render_parse_outcome(
    outcome: &ParseOutcome,
    supports_color: bool,
    supports_unicode: bool,
    width: u16,
) -> String {
    let index = &outcome.index;
    let mut out = String::new();

    for kind in FragmentKind::ALL {
        let names: Vec<&str> = index.required.names(kind).iter().map(String::as_str).collect();
        let label = ColoredText::dim(format!("Required {}s:", kind)).render(supports_color);
        let value = if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        };
        out.push_str(&format!("{} {}\n", label, value));
    }

    for (title, segments) in SECTIONS.iter().zip(index.sections()) {
        out.push('\n');
        out.push_str(
            &ColoredText::info(format!("{} ({})", title, segments.len()))
                .bold()
                .render(supports_color),
        );
        out.push('\n');
        for segment in segments {
            out.push_str("  ");
            out.push_str(&render_segment(segment, supports_color, supports_unicode, width));
            out.push('\n');
        }
    }

    if !outcome.diagnostics.is_empty() {
        out.push('\n');
        for diagnostic in &outcome.diagnostics {
            let icon = Icon::Warning.colored(supports_color, supports_unicode);
            let line = ColoredText::new(format!("line {}:", diagnostic.line), Tone::Warning)
                .render(supports_color);
            out.push_str(&format!("{} {} {}\n", icon, line, diagnostic.message()));
        }
    }

    out
}

fn render_segment(
    segment: &Segment,
    supports_color: bool,
    supports_unicode: bool,
    width: u16,
) -> String {
    match segment {
        Segment::Fragment(fragment) => format!(
            "{} {} {}",
            Icon::Fragment.colored(supports_color, supports_unicode),
            fragment.id,
            ColoredText::dim(format!("(offset {})", fragment.left_offset)).render(supports_color),
        ),
        Segment::Text { content } => {
            let lines = content.lines().count();
            let noun = if lines == 1 { "line" } else { "lines" };
            let head = format!("{} {} {}", Icon::Text.render(supports_unicode), lines, noun);
            // Two-space indent, icon, count and the separator come before the preview.
            let budget = (width as usize).saturating_sub(head.chars().count() + 6);
            let preview = truncate(content.lines().next().unwrap_or("").trim(), budget);
            format!(
                "{} {} {}",
                Icon::Text.colored(supports_color, supports_unicode),
                format_args!("{} {}", lines, noun),
                ColoredText::dim(format!("| {}", preview)).render(supports_color),
            )
        }
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            if max_width >= 3 {
                while used + 3 > max_width {
                    match out.pop() {
                        Some(last) => used -= last.width().unwrap_or(0),
                        None => break,
                    }
                }
                out.push_str("...");
            }
            return out;
        }
        used += w;
        out.push(c);
    }
    out
}
