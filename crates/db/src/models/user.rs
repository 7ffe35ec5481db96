//! User entity model.

use fleet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Only the columns the delivery engine reads; account management (sign-up,
/// authentication, profile editing) lives in the surrounding application.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
}

impl User {
    /// Display name used when addressing the user in a message body.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
