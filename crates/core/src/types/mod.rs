//! Core types for the campus wallet.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod money;
pub mod role;

pub use category::{CategoryError, SpendingCategory};
pub use id::*;
pub use money::Rupees;
pub use role::{Role, RoleError};
