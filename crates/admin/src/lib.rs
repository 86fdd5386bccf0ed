//! Catalog admin library.
//!
//! Multi-tenant catalog administration API: users own stores, and each store
//! holds billboards, categories, sizes, colors, products and orders. The
//! crate is a library so the router can be driven in tests with an
//! in-memory catalog; `main.rs` wires it to `PostgreSQL`, Sentry and TLS.
//!
//! # Security
//!
//! Identity is delegated to an external provider whose HS256 session tokens
//! are verified per request. Every mutation under `/api/{storeId}` checks
//! store ownership before touching storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod columns;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
pub use state::AppState;
