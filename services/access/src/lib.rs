//! Access service library
//!
//! Exposed as a library so integration tests can drive the repository and
//! router without going through the binary.

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
