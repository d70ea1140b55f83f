//! things - Things 3 bridge library
//!
//! This library provides the core of the things CLI: CRUD for Things 3
//! todos and projects, driven through AppleScript.
//!
//! # Core Concepts
//!
//! - **Transport**: one blocking `osascript` call per operation
//! - **Script**: escaped AppleScript generated from typed intents
//! - **Wire**: flat delimited text carrying rows of fields back out
//! - **Decode**: lenient conversion of that text into typed records
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `client`: The `Things` client, one method per operation
//! - `config`: Configuration loading from `config.toml`
//! - `decode`: Response decoding into records
//! - `error`: Error types and result aliases
//! - `model`: Records and intents
//! - `output`: JSON and human output rendering
//! - `script`: AppleScript escaping, dates and script assembly
//! - `transport`: Script execution and failure classification
//! - `wire`: Delimiters and per-record field schemas

pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod output;
pub mod script;
pub mod transport;
pub mod wire;

pub use client::Things;
pub use error::{Error, Result};
