//! Shared building blocks for the recommendations workspace.

pub mod types;
pub mod utils;
