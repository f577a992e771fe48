//! core
//!
//! Core building blocks for Caravel.
//!
//! # Modules
//!
//! - [`validators`] - Composable input validation rules
//! - [`config`] - Configuration schema and loading
//! - [`project`] - Project discovery and layout
//!
//! # Design Principles
//!
//! - Schemas are strict and self-describing
//! - Validation results are data, not errors

pub mod config;
pub mod project;
pub mod validators;
