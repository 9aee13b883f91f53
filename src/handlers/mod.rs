//! Task operation handlers
//!
//! Each user-level operation of `TaskService` lives in its own file.

pub mod add;
pub mod complete;
pub mod delete;
pub mod filter;
pub mod list;
pub mod update;
