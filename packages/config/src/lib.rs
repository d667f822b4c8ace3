// ABOUTME: Configuration constants for TodoLux
// ABOUTME: Environment variable names and their fallback defaults

pub mod constants;

pub use constants::*;
