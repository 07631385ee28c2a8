//! Fragment transform
//!
//! Turns the raw text of a fragment file into the text spliced into the
//! bundle, and builds the placeholder comments used when a fragment cannot
//! contribute real content.

use std::path::Path;

/// Process raw fragment text for splicing at `left_offset`
///
/// - whole-line `//` comments are removed
/// - leading blank lines are dropped, later runs collapse into a single newline
/// - every line after the first is indented by `left_offset` spaces
/// - trailing whitespace is trimmed; a trailing newline is kept if there was one
///
/// Output never starts with a newline: a fragment that opens with blank or
/// comment lines starts at its first code line, with no indent in front.
/// Spaces before the final newline are removed too, so `"a();  \n"`
/// becomes `"a();\n"`.
pub fn process_fragment(raw: &str, left_offset: usize) -> String {
    let indent = " ".repeat(left_offset);
    let mut out = String::with_capacity(raw.len());
    let mut pending_newline = false;

    for (i, line) in raw.split('\n').enumerate() {
        if i > 0 && !out.is_empty() {
            pending_newline = true;
        }
        if is_blank_line(line) || is_comment_line(line) {
            continue;
        }
        if pending_newline {
            out.push('\n');
            out.push_str(&indent);
            pending_newline = false;
        }
        out.push_str(line);
    }

    if pending_newline {
        out.push('\n');
    }
    trim_trailing(out)
}

/// Whether processed content has nothing to contribute
pub fn is_blank(processed: &str) -> bool {
    processed.trim().is_empty()
}

/// Placeholder spliced in place of a fragment that processed to nothing
pub fn empty_placeholder(path: &Path) -> String {
    format!("/* File {} is empty. */\n", path.display())
}

/// Placeholder spliced in place of a fragment that could not be read
pub fn unreadable_placeholder(path: &Path, reason: &str) -> String {
    format!(
        "/* File {} wasn't found ({}). */\n",
        path.display(),
        reason.replace("*/", "* /")
    )
}

fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

fn trim_trailing(mut text: String) -> String {
    let kept = text.trim_end().len();
    let had_newline = text[kept..].contains('\n');
    text.truncate(kept);
    if had_newline {
        text.push('\n');
    }
    text
}
