//! Use-case services composed from repositories.
//!
//! # Responsibility
//! - Sequence the multi-key writes of one user action (account + session).
//! - Keep the FFI layer free of storage key knowledge.
//!
//! # Invariants
//! - Writes of one action run sequentially; there is no rollback, so a
//!   failure between them leaves the session and users collection diverged
//!   until the next successful update.

pub mod auth_service;
pub mod profile_service;
