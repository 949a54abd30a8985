//! HTTP handlers
//!
//! Thin axum handlers translating requests into service calls.

pub mod events;
pub mod health;
pub mod photos;
pub mod votes;
