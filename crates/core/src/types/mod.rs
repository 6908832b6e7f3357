//! Core types for Hotslice.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod image;
pub mod price;
pub mod status;

pub use id::*;
pub use image::{ImageRef, Placeholder, resolve_image};
pub use price::{CurrencyCode, Price};
pub use status::{OrderStatus, UserRole};
