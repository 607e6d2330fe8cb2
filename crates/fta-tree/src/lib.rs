//! FTA Tree - Fault tree registry and primary event classification
//!
//! This crate implements the construction stage of fault tree analysis:
//! - Gate registration with a single top event
//! - Identifier uniqueness across the tree
//! - One-way lock once classification has run
//! - Flat classification of children into gates and primary events
//! - Orphan gate detection and model feature counts

pub mod config;
pub mod features;
pub mod tree;

pub use config::*;
pub use features::*;
pub use tree::*;
