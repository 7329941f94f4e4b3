//! Records persisted by the core.
//!
//! # Responsibility
//! - Define the JSON shapes stored under the `users`, `user`, `@tasks`
//!   and `@settings` keys.
//! - Hold input validation that belongs to the record itself.
//!
//! # Invariants
//! - Field names on the wire are camelCase and stay readable by older blobs.

pub mod account;
pub mod preferences;
pub mod task;
