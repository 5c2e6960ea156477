//! Core domain types, errors, and constants for `redeemd`.
//!
//! This crate establishes the foundational data structures and error handling
//! mechanisms used throughout the workspace.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.
//! - **`types`**: Domain newtypes (`ResourcePath`, `RedeemCode`) that enforce
//!   invariants at the type level.
//! - **`constants`**: Shared constants such as header names, form and query
//!   parameter names, and the streaming chunk size.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::{RedeemCode, ResourcePath},
};
