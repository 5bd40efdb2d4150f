//! Core data types and structures
//!
//! This module contains the fundamental data types used throughout tfgraph,
//! separated from their implementation logic.

pub mod identifier;
pub mod types;

pub use types::*;
