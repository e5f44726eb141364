//! CLI library components for the people table.

pub mod logging;
pub mod render;
pub mod session;
