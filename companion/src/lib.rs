//! Companion Library
//!
//! Composition root of the family health record: [`Services`] wires the
//! repositories, the blob store and the auth gateway from configuration, and
//! [`demo`] walks one account through the main workflows.

pub mod container;
pub mod demo;

pub use container::Services;
pub use demo::{run_demo, DemoOptions, DemoReport};
