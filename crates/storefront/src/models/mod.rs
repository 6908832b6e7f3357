//! Types kept in the visitor's session.

pub mod session;

pub use session::{CurrentShopper, Flash, FlashKind, keys};
