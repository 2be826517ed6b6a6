//! Initialization module for creating `.medidoc` directory structures.
//!
//! This module scaffolds a project-local `.medidoc/` directory from the
//! assets embedded in the binary:
//! - Global configuration (`config.toml`)
//! - Workflow definitions (`workflows/*.yaml`)
//!
//! # Example
//!
//! ```no_run
//! use mdc_core::init::{InitOptions, generate_medidoc_structure};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = InitOptions {
//!     target_dir: PathBuf::from("."),
//!     force: false,
//!     minimal: false,
//! };
//!
//! let written = generate_medidoc_structure(options).await?;
//! println!("Wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;

pub use error::{InitError, InitResult};
pub use generator::{generate_medidoc_structure, InitOptions};
