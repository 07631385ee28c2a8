//! Assembler - walks a parsed index and concatenates the bundle text

use crate::domain::entities::{FragmentRef, ParsedIndex, Segment};

/// Concatenate every segment of `index` in bundle order
///
/// Sections are visited as `top_of_file`, `before_body`, `body`,
/// `after_body`. Text segments contribute their literal content; fragment
/// segments contribute whatever `resolve` returns for them.
pub fn assemble<F>(index: &ParsedIndex, mut resolve: F) -> String
where
    F: FnMut(&FragmentRef) -> String,
{
    let mut bundle = String::new();
    for segment in index.segments() {
        match segment {
            Segment::Text { content } => bundle.push_str(content),
            Segment::Fragment(fragment) => bundle.push_str(&resolve(fragment)),
        }
    }
    bundle
}
