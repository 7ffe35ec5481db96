//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus any lifecycle helpers that belong to the entity.

pub mod notification;
pub mod status;
pub mod user;
