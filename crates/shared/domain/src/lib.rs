//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, plus `utoipa`
//! behind the `server` feature for schema derives).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod activity;
pub mod config;
pub mod constants;
pub mod registry;
