//! Heaven Core
//!
//! Core types and abstractions shared by the heaven status client and CLI.
//!
//! This crate contains:
//! - Domain types: job identifiers and reloader configuration
//! - Document: the addressable-element target that reloaded fragments land in

pub mod document;
pub mod domain;

pub use document::{Document, DocumentError, MemoryDocument};
