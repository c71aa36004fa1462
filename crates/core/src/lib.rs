//! CampusChain Core - Shared types library.
//!
//! This crate provides common types used across all wallet client components:
//! - `client` - Session store and HTTP client for the campus wallet API
//! - `cli` - Role-specific dashboards rendered in the terminal
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no HTTP clients. Balances and totals are computed by the API; the
//! types here only carry and display them.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, roles, spending categories and rupee amounts
//! - [`cart`] - Local canteen cart built up before an order is placed
//! - [`spending`] - Per-category totals and spending bar widths

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod spending;
pub mod types;

pub use cart::{Cart, CartLine};
pub use spending::CategoryBreakdown;
pub use types::*;
