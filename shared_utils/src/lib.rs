//! Small helpers shared by the dashboard crates.

pub mod env;
