//! Library core of the enrollment client.
//!
//! The CLI binary is a thin front over these modules; everything here is
//! usable without a terminal.

pub mod cli;
pub mod client;
pub mod config;
pub mod draft;
pub mod rules;
pub mod schema;
pub mod submit;
