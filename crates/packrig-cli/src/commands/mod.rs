//! Command implementations.
//!
//! - [`generate`] - print or write the generated configuration
//! - [`types`] - list the registered project types

pub mod generate;
pub mod types;

pub use generate::execute as generate_execute;
pub use types::execute as types_execute;
