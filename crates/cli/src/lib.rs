//! CampusChain wallet terminal dashboards.
//!
//! One screen per role (student, parent, vendor, admin) plus the canteen.
//! Handlers in [`commands`] return rendered text so they can be driven
//! against a stub API in tests; the `campus-wallet` binary prints it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod commands;
pub mod error;
pub mod views;

pub use app::App;
pub use error::CliError;
