//! Placement value object - where a local fragment lands in the bundle

use serde::{Deserialize, Serialize};

/// Marker prefix of a placement token inside a `useLocal` rule
pub const PLACEMENT_PREFIX: char = '@';

/// Position of a local fragment relative to the index body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Before the index body (`@before`)
    Before,
    /// Inline, at the directive's position in the body (`@here`)
    Here,
    /// After the index body (`@after`)
    After,
}

impl Placement {
    /// Parse a full placement token, including the `@` prefix
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "@before" => Some(Placement::Before),
            "@here" => Some(Placement::Here),
            "@after" => Some(Placement::After),
            _ => None,
        }
    }

    /// Token spelling of this placement
    pub fn token(&self) -> &'static str {
        match self {
            Placement::Before => "@before",
            Placement::Here => "@here",
            Placement::After => "@after",
        }
    }

    /// Whether an argument is meant as a placement token
    pub fn is_token(argument: &str) -> bool {
        argument.starts_with(PLACEMENT_PREFIX)
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
