//! # mdc-protocol
//!
//! Core protocol definitions and data models for medidoc.
//!
//! This crate defines all shared data structures used for:
//! - Configuration file parsing (TOML config, YAML workflows)
//! - Input artifact and report payload descriptions
//! - Communication between renderers and the orchestration core
//!
//! ## Modules
//!
//! - [`artifact_models`]: Input file metadata
//! - [`config_models`]: Global configuration from config.toml
//! - [`stage_models`]: Workflow definitions and stage status
//! - [`report_models`]: Report payload rendered after a run
//! - [`view_models`]: Report view names
//! - [`ipc`]: Commands and render instructions
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs, uuid and chrono
//! - TypeScript generation: All types derive `TS` so a browser renderer can
//!   consume the same instruction stream
//! - Independent compilation: No dependencies on other medidoc crates

pub mod artifact_models;
pub mod config_models;
pub mod ipc;
pub mod report_models;
pub mod stage_models;
pub mod view_models;

// Re-export all public types for convenience
pub use artifact_models::*;
pub use config_models::*;
pub use ipc::*;
pub use report_models::*;
pub use stage_models::*;
pub use view_models::*;
