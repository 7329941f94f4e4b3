//! Mobile shell bindings for VenMeku core.

pub mod api;
