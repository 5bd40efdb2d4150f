//! Small helpers shared across modules

pub mod path;
pub mod string;
