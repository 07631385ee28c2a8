//! Fragment kind value object - defines where a fragment is resolved
//!
//! - `Local` fragments live in the active project's imports directory
//! - `Global` fragments live in the shared globals directory

use serde::{Deserialize, Serialize};

/// Kind of a fragment (which root directory it is resolved against)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Shared across projects, always spliced at the top of the bundle
    Global,
    /// Scoped to the active project
    Local,
}

impl FragmentKind {
    /// Both kinds, in the order the bundler reports them
    pub const ALL: [FragmentKind; 2] = [FragmentKind::Global, FragmentKind::Local];

    /// Directive keyword that declares fragments of this kind
    pub fn rule_keyword(&self) -> &'static str {
        match self {
            FragmentKind::Global => "useGlobal",
            FragmentKind::Local => "useLocal",
        }
    }

    /// Resolve a directive keyword (case-sensitive)
    pub fn from_rule_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "useGlobal" => Some(FragmentKind::Global),
            "useLocal" => Some(FragmentKind::Local),
            _ => None,
        }
    }
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentKind::Global => write!(f, "global"),
            FragmentKind::Local => write!(f, "local"),
        }
    }
}
