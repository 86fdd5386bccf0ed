//! Catalog Admin Core - Shared types library.
//!
//! This crate provides common types used across all Catalog Admin components:
//! - `admin` - The catalog administration API and dashboard views
//! - `cli` - Command-line tools for migrations, seeding and dev tokens
//! - `integration-tests` - Black-box tests against the admin router
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, user identities and prices
//! - [`format`] - Display formatting for dashboard list views

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod types;

pub use format::{format_date, ordinal_suffix};
pub use types::*;
