//! CLI command implementation for readstats.
//!
//! - [`stats`] - Compute per-read metrics, annotate region overlap and write reports
//! - [`common`] - Option groups shared by commands
//! - [`command`] - The [`command::Command`] trait

#![allow(clippy::cast_possible_truncation, clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod command;
pub mod common;
pub mod stats;
