//! Directive parser
//!
//! Turns raw index text into a [`ParsedIndex`]. The parser is a two-state
//! machine over lines:
//!
//! ```text
//! Normal ──"/* AUAUST"──▶ InDirectiveBlock ──"*/"──▶ Normal
//! ```
//!
//! Outside a block, lines are index text. Inside a block, each line may hold
//! one instruction:
//!
//! ```text
//! /* AUAUST
//!  * useGlobal utils polyfills
//!  * useLocal helpers @after
//!  */
//! ```
//!
//! Blank lines and whole-line `//` comments are dropped in both states.

mod diagnostics;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::entities::{FragmentId, ParsedIndex, Segment};
use crate::domain::value_objects::{FragmentKind, Placement};

pub use diagnostics::{DiagnosticKind, ParseDiagnostic};

/// Token closing a directive block
pub const BLOCK_CLOSE: &str = "*/";

static SKIPPED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(//.*)?$").unwrap());

static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*/\*\s*AUAUST\s*$").unwrap());

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*?\s*(?P<rule>\w+)\s+(?P<arguments>.*)").unwrap()
});

/// Result of parsing an index: the structure plus what was wrong with it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseOutcome {
    pub index: ParsedIndex,
    pub diagnostics: Vec<ParseDiagnostic>,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Normal,
    InDirectiveBlock { left_offset: usize, opened_at: usize },
}

/// Parse index text into its ordered segment structure
///
/// This is a pure function: the same text always yields the same outcome.
pub fn parse_index(text: &str) -> ParseOutcome {
    let mut builder = IndexBuilder::default();
    let mut state = State::Normal;

    // A lone `\r` also ends a line; numbering follows `\n`.
    let lines = text
        .lines()
        .enumerate()
        .flat_map(|(i, physical)| physical.split('\r').map(move |line| (i + 1, line)));

    for (line_no, line) in lines {
        if SKIPPED_LINE.is_match(line) {
            continue;
        }

        match state {
            State::InDirectiveBlock { left_offset, .. } => {
                if line.contains(BLOCK_CLOSE) {
                    state = State::Normal;
                } else if let Some(instruction) = Instruction::parse(line) {
                    builder.apply(instruction, left_offset, line_no);
                }
            }
            State::Normal => match block_open_offset(line) {
                Some(left_offset) => {
                    state = State::InDirectiveBlock {
                        left_offset,
                        opened_at: line_no,
                    };
                }
                None => builder.push_text(line),
            },
        }
    }

    if let State::InDirectiveBlock { opened_at, .. } = state {
        builder
            .diagnostics
            .push(ParseDiagnostic::new(opened_at, DiagnosticKind::UnclosedBlock));
    }

    builder.finish()
}

/// Column of `/*` if the line opens a directive block
fn block_open_offset(line: &str) -> Option<usize> {
    if !BLOCK_OPEN.is_match(line) {
        return None;
    }
    line.find("/*").map(|byte_idx| line[..byte_idx].chars().count())
}

/// A `<rule> <arguments...>` line inside a directive block
#[derive(Debug, Clone, PartialEq, Eq)]
struct Instruction<'a> {
    rule: &'a str,
    arguments: Vec<&'a str>,
}

impl<'a> Instruction<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let caps = INSTRUCTION.captures(line)?;
        let rule = caps.name("rule")?.as_str();
        let arguments = caps
            .name("arguments")
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();
        Some(Self { rule, arguments })
    }
}

/// Accumulates segments while the state machine walks the lines
#[derive(Debug, Default)]
struct IndexBuilder {
    index: ParsedIndex,
    pending_text: String,
    diagnostics: Vec<ParseDiagnostic>,
}

impl IndexBuilder {
    fn push_text(&mut self, line: &str) {
        self.pending_text.push_str(line);
        self.pending_text.push('\n');
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            let content = std::mem::take(&mut self.pending_text);
            self.index.body.push(Segment::text(content));
        }
    }

    fn apply(&mut self, instruction: Instruction<'_>, left_offset: usize, line_no: usize) {
        let Some(kind) = FragmentKind::from_rule_keyword(instruction.rule) else {
            return;
        };

        match kind {
            FragmentKind::Global => {
                self.push_fragments(kind, &instruction.arguments, left_offset, line_no, None);
            }
            FragmentKind::Local => {
                let (tokens, names): (Vec<&str>, Vec<&str>) = instruction
                    .arguments
                    .iter()
                    .partition(|arg| Placement::is_token(arg));

                let placement = match tokens.as_slice() {
                    [] => Err(DiagnosticKind::MissingPlacement),
                    [token] => Placement::from_token(token).ok_or_else(|| {
                        DiagnosticKind::InvalidPlacement {
                            token: token.to_string(),
                        }
                    }),
                    _ => Err(DiagnosticKind::MultiplePlacements {
                        tokens: tokens.iter().map(|t| t.to_string()).collect(),
                    }),
                };

                match placement {
                    Ok(placement) => {
                        self.push_fragments(kind, &names, left_offset, line_no, Some(placement))
                    }
                    Err(diagnostic) => self
                        .diagnostics
                        .push(ParseDiagnostic::new(line_no, diagnostic)),
                }
            }
        }
    }

    fn push_fragments(
        &mut self,
        kind: FragmentKind,
        names: &[&str],
        left_offset: usize,
        line_no: usize,
        placement: Option<Placement>,
    ) {
        if placement == Some(Placement::Here) {
            self.flush_text();
        }

        for name in names {
            let id = FragmentId::new(kind, *name);
            if !self.index.required.insert(&id) {
                self.diagnostics.push(ParseDiagnostic::new(
                    line_no,
                    DiagnosticKind::DuplicateFragment { id: id.clone() },
                ));
            }

            let segment = Segment::fragment(id, left_offset);
            match (kind, placement) {
                (FragmentKind::Global, _) => self.index.top_of_file.push(segment),
                (FragmentKind::Local, Some(Placement::Before)) => {
                    self.index.before_body.push(segment)
                }
                (FragmentKind::Local, Some(Placement::After)) => {
                    self.index.after_body.push(segment)
                }
                (FragmentKind::Local, Some(Placement::Here) | None) => self.index.body.push(segment),
            }
        }
    }

    fn finish(mut self) -> ParseOutcome {
        self.flush_text();
        ParseOutcome {
            index: self.index,
            diagnostics: self.diagnostics,
        }
    }
}
