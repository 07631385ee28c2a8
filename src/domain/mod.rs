//! Domain Layer
//!
//! The core of the bundler - pure logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Segments, fragment identities, the parsed index
//! - `value_objects/` - Fragment kinds, placements, config warnings
//! - `services/` - Directive parser, fragment transform, assembler
//! - `ports/` - Interface definitions for infrastructure (file system,
//!   change notification, event sinks)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - The parser and assembler keep no state between calls
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
