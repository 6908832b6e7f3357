//! Hotslice Core - Shared types, mock catalog and cart logic.
//!
//! This crate provides what both Hotslice binaries build on:
//! - `storefront` - Buyer-facing site (menu, cart, checkout, order history)
//! - `seller` - Seller portal (inventory, shop orders, analytics)
//! - `cli` - Dataset checks and reports
//!
//! # Architecture
//!
//! The core crate contains types and pure domain logic only - no HTTP, no
//! filesystem access. The mock dataset is embedded at compile time, which
//! keeps the crate usable anywhere, including tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, images and statuses
//! - [`catalog`] - The mock dataset with id lookups and integrity checks
//! - [`cart`] - Cart state container and its per-seller projection
//! - [`orders`] - Buyer and seller views of placed orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod types;

pub use types::*;
