//! Parse diagnostics - problems found in directive blocks

use serde::Serialize;

use crate::domain::entities::FragmentId;

/// What went wrong with a directive line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `useLocal` without any `@` token
    MissingPlacement,
    /// `useLocal` with an `@` token that is not a known placement
    InvalidPlacement { token: String },
    /// `useLocal` with more than one `@` token
    MultiplePlacements { tokens: Vec<String> },
    /// The same fragment declared twice (still emitted twice)
    DuplicateFragment { id: FragmentId },
    /// Input ended inside a directive block
    UnclosedBlock,
}

/// A diagnostic attached to a 1-indexed line of the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub line: usize,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl ParseDiagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }

    /// Whether the whole instruction was dropped because of this diagnostic
    pub fn discards_instruction(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::MissingPlacement
                | DiagnosticKind::InvalidPlacement { .. }
                | DiagnosticKind::MultiplePlacements { .. }
        )
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::MissingPlacement => {
                "Declared an \"useLocal\" rule without specifying \"@before\", \"@after\" or \"@here\". Ignoring the declaration.".to_string()
            }
            DiagnosticKind::InvalidPlacement { token } => format!(
                "Unknown placement \"{}\" in an \"useLocal\" rule. The only @ arguments allowed are \"@before\", \"@after\" and \"@here\". The rule has been ignored.",
                token
            ),
            DiagnosticKind::MultiplePlacements { tokens } => format!(
                "An \"useLocal\" rule declares several placements ({}). Ignoring the declaration.",
                tokens.join(", ")
            ),
            DiagnosticKind::DuplicateFragment { id } => format!(
                "Fragment \"{}\" is declared multiple times. Added twice, be aware of errors.",
                id
            ),
            DiagnosticKind::UnclosedBlock => {
                "Directive block is never closed; every following line is read as a directive.".to_string()
            }
        }
    }
}

impl std::fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message())
    }
}
