//! Cadence Core - Foundational types for the Cadence scheduler
//!
//! This crate provides the core types that the other Cadence crates depend on:
//! - `UnitId` - Stable handles for schedulable units
//! - Error types and Result alias

mod error;
mod id;

pub use error::{CadenceError, Result};
pub use id::UnitId;
