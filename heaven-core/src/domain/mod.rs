//! Core domain types
//!
//! This module contains the structures shared between the HTTP client
//! (which talks to the heaven web service) and the CLI.

pub mod job;
pub mod reloader;
