//! Shared foundational types used across the Aion place-and-route core.
//!
//! This crate provides interned identifiers, handle checksums, and the common
//! internal error and result types.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::handle_checksum;
pub use ident::{Ident, Interner};
pub use result::{AionResult, InternalError};
