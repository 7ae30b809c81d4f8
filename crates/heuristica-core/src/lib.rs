//! # Heuristica Core
//!
//! Shared primitives for the Heuristica crates.
//!
//! This crate provides:
//! - [`HeuristicaError`] - Error taxonomy shared by the solver and the planner
//! - [`Result`] - Convenience result alias

pub mod error;

pub use error::{HeuristicaError, Result};
