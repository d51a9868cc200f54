//! AppFW CLI Library
//!
//! Command-line front end for the AppFW mobile test-automation library:
//! locator lookup, offline and live screen element dumps, and the login flow.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, DumpArgs, LocateArgs, LoginArgs, ParseArgs, SessionArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Reporter;
