//! FinSmart — Contextual Intelligence for Modern Markets
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod feed;
pub mod sources;
pub mod insight;
pub mod dashboard;
