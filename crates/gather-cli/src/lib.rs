//! CLI library components for the gather tool.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
