//! Parsed index entity
//!
//! The result of running the directive parser over an index file: four
//! ordered segment sequences plus the set of fragments they require.

use std::collections::BTreeSet;

use serde::Serialize;

use super::segment::{FragmentId, FragmentRef, Segment};
use crate::domain::value_objects::FragmentKind;

/// Fragments required by an index, partitioned by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequiredSet {
    pub globals: BTreeSet<String>,
    pub locals: BTreeSet<String>,
}

impl RequiredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names required for one kind
    pub fn names(&self, kind: FragmentKind) -> &BTreeSet<String> {
        match kind {
            FragmentKind::Global => &self.globals,
            FragmentKind::Local => &self.locals,
        }
    }

    /// Add a fragment; returns false if it was already required
    pub fn insert(&mut self, id: &FragmentId) -> bool {
        let names = match id.kind {
            FragmentKind::Global => &mut self.globals,
            FragmentKind::Local => &mut self.locals,
        };
        names.insert(id.name.clone())
    }

    pub fn contains(&self, id: &FragmentId) -> bool {
        self.names(id.kind).contains(&id.name)
    }

    pub fn len(&self) -> usize {
        self.globals.len() + self.locals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.locals.is_empty()
    }

    /// All required fragments, globals first, names in order
    pub fn iter(&self) -> impl Iterator<Item = FragmentId> + '_ {
        FragmentKind::ALL.into_iter().flat_map(move |kind| {
            self.names(kind)
                .iter()
                .map(move |name| FragmentId::new(kind, name.clone()))
        })
    }
}

/// Ordered segment structure of an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedIndex {
    /// Global fragments, spliced first
    pub top_of_file: Vec<Segment>,
    /// Local `@before` fragments
    pub before_body: Vec<Segment>,
    /// Index text interleaved with local `@here` fragments
    pub body: Vec<Segment>,
    /// Local `@after` fragments
    pub after_body: Vec<Segment>,
    /// Every fragment referenced above
    pub required: RequiredSet,
}

impl ParsedIndex {
    /// Sections in bundle order
    pub fn sections(&self) -> [&[Segment]; 4] {
        [
            self.top_of_file.as_slice(),
            self.before_body.as_slice(),
            self.body.as_slice(),
            self.after_body.as_slice(),
        ]
    }

    /// All segments in bundle order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.sections().into_iter().flatten()
    }

    /// All fragment references in bundle order
    pub fn fragment_refs(&self) -> impl Iterator<Item = &FragmentRef> {
        self.segments().filter_map(Segment::fragment_ref)
    }

    pub fn segment_count(&self) -> usize {
        self.sections().iter().map(|s| s.len()).sum()
    }
}
