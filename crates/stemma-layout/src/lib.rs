#![forbid(unsafe_code)]

//! Family diagram layout: tier ordering and x-coordinate assignment.
//!
//! Two passes over the visible person set:
//! 1. top-down canonical ordering (deterministic, coordinate-free), then
//! 2. bottom-up placement of couple/single units with overlap resolution.
//!
//! The engine is a pure synchronous computation over an immutable snapshot; nothing is
//! cached between invocations.

pub mod config;
pub mod error;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod unit;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use pipeline::{NodePosition, layout};
pub use unit::Unit;
