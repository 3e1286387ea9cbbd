//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified application error type
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
