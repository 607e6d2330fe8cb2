//! FTA Core - Fundamental types for fault tree construction
//!
//! This crate defines the types shared by the tree registry and its
//! downstream consumers:
//! - Identifiers (EventId)
//! - Gates, primary events and child references
//! - Construction errors

pub mod id;
pub mod event;
pub mod error;

pub use id::*;
pub use event::*;
pub use error::*;
