//! Builder API for assembling scene tables.
//!
//! This module provides a fluent builder and a macro for constructing
//! directors with minimal boilerplate. Everything that can be validated
//! before the loop starts is validated here, so a misconfigured table
//! fails at build time rather than mid-run.

pub mod director;
pub mod error;
pub mod macros;

pub use director::DirectorBuilder;
pub use error::BuildError;
