//! Cakeshop Backend Library
//!
//! Exposes the core modules for use by the binary and integration tests.

pub mod auth;
pub mod config;
pub mod middleware;
pub mod routes;
