//! # CLI Module
//!
//! Command-line utilities for working with binding declarations.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! List every declared handler with each parameter's resolved key, declared
//! type and options:
//!
//! ```bash
//! multibody inspect --bindings bindings.yaml
//! ```
//!
//! ### `probe`
//!
//! Resolve one handler's parameters against a body and print a JSON report:
//!
//! ```bash
//! multibody probe --bindings bindings.yaml --handler multi_basic_type \
//!     --body-text '{"param1": 1, "param2": "true", "param3": 2.5}'
//! ```
//!
//! Options:
//! - `--body <FILE>` or `--body-text <TEXT>` - the request body (one is required)
//! - `--lenient` - report failures as `null` values, as the lenient policy does
//!
//! Binding and logging configuration come from the `MULTIBODY_*` environment
//! variables (see [`crate::runtime_config`] and [`crate::logging`]).
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use multibody::cli::run_cli;
//!
//! run_cli()?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{execute, inspect_report, probe_report, run_cli, Cli, Commands};
