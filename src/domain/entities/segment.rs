//! Segment entity - one ordered piece of the bundle

use serde::Serialize;

use crate::domain::value_objects::FragmentKind;

/// Identity of a fragment: its kind plus its name (file stem)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FragmentId {
    pub kind: FragmentKind,
    pub name: String,
}

impl FragmentId {
    pub fn new(kind: FragmentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self::new(FragmentKind::Global, name)
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(FragmentKind::Local, name)
    }
}

impl std::fmt::Display for FragmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// Reference to a fragment at a given indentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentRef {
    pub id: FragmentId,
    /// Column of the directive block that declared the fragment
    pub left_offset: usize,
}

impl FragmentRef {
    pub fn new(id: FragmentId, left_offset: usize) -> Self {
        Self { id, left_offset }
    }
}

/// One ordered piece of a parsed index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Literal index text, spliced verbatim
    Text { content: String },
    /// Processed content of a fragment
    Fragment(FragmentRef),
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn fragment(id: FragmentId, left_offset: usize) -> Self {
        Segment::Fragment(FragmentRef::new(id, left_offset))
    }

    /// The referenced fragment, if this is a fragment segment
    pub fn fragment_ref(&self) -> Option<&FragmentRef> {
        match self {
            Segment::Fragment(r) => Some(r),
            Segment::Text { .. } => None,
        }
    }
}
