//! # CLI Layer
//!
//! One possible client of the library, and the only place that:
//! - parses arguments
//! - installs the log subscriber
//! - writes to stdout
//! - decides exit codes (in `main.rs`)
//!
//! Every invocation opens the save directory, runs [`SaveApi::startup`], dispatches the
//! command and finishes with [`SaveApi::persist`].
//!
//! [`SaveApi::startup`]: bettersave::api::SaveApi::startup
//! [`SaveApi::persist`]: bettersave::api::SaveApi::persist

mod commands;
mod print;
mod setup;

pub use commands::run;
