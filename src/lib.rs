//! Dynalist mirror - keep a local OPML copy of a Dynalist folder
//!
//! This crate provides the core functionality for the `dlm` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`remote`] - Dynalist API types and client
//! - [`tree`] - Flat file listing → owned item tree
//! - [`outline`] - Document nodes → OPML
//! - [`sync`] - Batched export, snapshots, reconciliation and update
//! - [`config`] - Settings file and token discovery
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod outline;
pub mod remote;
pub mod sync;
pub mod tree;

pub use error::{Error, Result};
