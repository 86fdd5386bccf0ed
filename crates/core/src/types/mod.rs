//! Core types for Catalog Admin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod user;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use user::{UserId, UserIdError};
