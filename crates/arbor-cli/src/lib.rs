//! # arbor-cli
//!
//! Command-line front end for the Arbor ACL.
//!
//! - `arbor check`: resolve a user's or role's verdict on a resource
//! - `arbor locate`: map a resource path to a resource node
//! - `arbor config`: inspect or create the configuration file
//!
//! Permission data is read from a fixture file (see
//! [`arbor_storage::Fixture`]).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use config::ArborConfig;
pub use error::{Error, Result};
