#![forbid(unsafe_code)]

//! Family-graph semantic model (headless).
//!
//! Design goals:
//! - deterministic outputs over an immutable record snapshot
//! - cycle-tolerant traversals: malformed relationship data never aborts a solve
//! - no internal caching; callers re-invoke on a fresh snapshot after any write

pub mod error;
pub mod generation;
pub mod index;
pub mod model;
pub mod visibility;

pub use error::{Error, Result};
pub use index::PersonIndex;
pub use model::{Gender, GenerationLabel, Person, PersonId, RootAssertion};
pub use visibility::{SolveOptions, VisibleSet, descendant_generations, owning_families, visible_set};
