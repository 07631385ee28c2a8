//! Application Layer
//!
//! Use cases that orchestrate the bundling flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `Bundler` - Owns the parsed index, fragment cache and watch set; runs rebuild passes
//! - `FragmentStore` - Per-fragment cache of raw and processed content
//! - `WatchManager` - Keeps change subscriptions in step with the required set
//! - `WatchUseCase` - Debounced watch loop driving the bundler

pub mod bundler;
pub mod fragment_store;
pub mod watch;
pub mod watch_manager;

pub use bundler::{Bundler, PassReport};
pub use fragment_store::{FragmentStore, Origin, Resolved};
pub use watch::{WatchOptions, WatchUseCase, WatcherState};
pub use watch_manager::{Reconciliation, WatchManager};
