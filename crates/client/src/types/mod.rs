//! Request and response types for the wallet API.
//!
//! Field names follow the API's JSON. Response types tolerate missing
//! optional fields so a backend that grows or trims its payloads does not
//! break the dashboards.

pub mod admin;
pub mod auth;
pub mod canteen;
pub mod parent;
pub mod student;
pub mod vendor;

use serde::{Deserialize, Serialize};

pub use admin::*;
pub use auth::*;
pub use canteen::*;
pub use parent::*;
pub use student::*;
pub use vendor::*;

/// Generic acknowledgement carrying a human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
