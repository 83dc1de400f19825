//! Command implementations.

pub mod completions;
pub mod hash;
pub mod push;
pub mod version;
