//! # malo - Python Project Helper
//!
//! malo scaffolds Python projects and keeps their `requirements.txt` in step
//! with what is actually installed in the project's virtual environment.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a new FastAPI project
//! malo create myapp --api
//!
//! # Add and remove packages
//! malo add requests
//! malo rm requests
//! ```
//!
//! ## Module Organization
//!
//! - [`manifest`] - Reading and reconciling the requirements manifest
//! - [`python`] - Interpreter, venv and pip invocations
//! - [`process`] / [`store`] - Process and filesystem capabilities
//! - [`commands`] - CLI command handlers

/// CLI command handlers.
pub mod commands;

/// Configuration file parsing (`malo.toml`).
pub mod config;

/// Requirements manifest reconciler.
pub mod manifest;

/// External process execution.
pub mod process;

/// Project root and derived paths.
pub mod project;

/// Interpreter, venv and pip invocations.
pub mod python;

/// Filesystem access.
pub mod store;

/// Files written by `malo create`.
pub mod templates;

/// Terminal UI utilities (tables, spinners).
pub mod ui;

#[cfg(test)]
mod testing;
