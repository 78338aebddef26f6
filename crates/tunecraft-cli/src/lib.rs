//! Tunecraft CLI library.
//!
//! This crate provides the commands behind the `tunecraft` binary and the
//! pieces of the HTTP API: configuration, music providers, the catalog,
//! track library and quota services, and the axum server.

pub mod commands;
pub mod config;
pub mod provider;
pub mod rng;
pub mod services;
