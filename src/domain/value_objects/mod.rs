//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod fragment_kind;
mod placement;
mod project_layout;

pub use config_warning::ConfigWarning;
pub use fragment_kind::FragmentKind;
pub use placement::{Placement, PLACEMENT_PREFIX};
pub use project_layout::{FragmentRoots, ProjectLayout};
