//! # mdc-core
//!
//! Orchestration core for medidoc, a simulated medical document analysis
//! workbench.
//!
//! This crate provides:
//! - Configuration loading from the `.medidoc/` directory
//! - A frame-driven stage animator and a strictly sequential stage sequencer
//! - Intake validation, exclusive report view selection and report generation
//! - The `Workbench` run controller that ties them to a render sink
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`engine`]: Frame scheduling, animation and stage sequencing
//! - [`intake`]: File type validation
//! - [`views`]: Report view switching
//! - [`report`]: Report provider abstraction
//! - [`render`]: Render sink abstraction
//! - [`state`]: Run control
//! - [`init`]: `.medidoc/` scaffolding

pub mod assets;
pub mod config;
pub mod engine;
pub mod init;
pub mod intake;
pub mod render;
pub mod report;
pub mod state;
pub mod views;
