//! l10n-tools - translation state management for gettext-style projects
//!
//! Keeps per-locale translation files in step with the keys extracted from
//! source code: new keys are added, vanished keys are marked obsolete, gaps
//! are filled from a fallback locale, and every translation is checked for
//! broken placeholders and markup.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: `.l10nrc.json` loading and parsing
//! - `core`: Entry model, persistence and reconciliation
//! - `issues`: Issue type definitions and reporting
//! - `validator`: Message format validation

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod validator;
