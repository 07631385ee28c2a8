//! Domain Services
//!
//! Pure business logic that operates on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod assembler;
pub mod directive_parser;
mod fragment_transform;

pub use assembler::assemble;
pub use directive_parser::{parse_index, DiagnosticKind, ParseDiagnostic, ParseOutcome};
pub use fragment_transform::{
    empty_placeholder, is_blank, process_fragment, unreadable_placeholder,
};
