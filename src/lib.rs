//! Client for the EdgeCast cache-management API
//!
//! Translates purge and preload requests against an EdgeCast account's edge
//! cache into signed HTTP PUT calls, collapsing the response status into a
//! boolean outcome.

pub mod cache;
pub mod error;
pub mod models;

pub use error::{Error, Result};
