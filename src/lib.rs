//! FindME username scanner
//!
//! Checks which web platforms host an account for a username by probing
//! every platform of a catalog concurrently over HTTP.

pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod errors;
pub mod models;
pub mod probe;
pub mod reporter;
pub mod scanner;
pub mod ui;

pub use errors::{FindmeError, FindmeResult};
pub use scanner::{ScanConfig, UsernameScanner};
