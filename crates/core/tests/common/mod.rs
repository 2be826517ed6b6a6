//! Common test utilities shared by the integration tests.
//!
//! This module provides:
//! - Test fixtures (artifacts, workbenches, project directories)
//! - Assertions over recorded render instructions

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
