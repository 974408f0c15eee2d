//! API route handlers
//!
//! Each submodule contains the handlers for one group of endpoints.

pub mod health;
pub mod metrics;
