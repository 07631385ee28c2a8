//! Domain Entities
//!
//! - `Segment` - An ordered piece of the bundle (literal text or fragment reference)
//! - `ParsedIndex` - The ordered segment structure of an index plus its `RequiredSet`

mod parsed_index;
mod segment;

pub use parsed_index::{ParsedIndex, RequiredSet};
pub use segment::{FragmentId, FragmentRef, Segment};
