//! authgate - minimal authentication gateway
//!
//! Registers users, issues and revokes session tokens, guards a profile
//! route and proxies the public API catalogue. All state is in memory.

pub mod api;
pub mod auth;
pub mod config;
pub mod feed;
pub mod middleware;
