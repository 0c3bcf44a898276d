//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod assignment;
pub mod audit;
pub mod employee;
pub mod event;
pub mod issue;
pub mod notification;
pub mod sales;
pub mod subtask;
