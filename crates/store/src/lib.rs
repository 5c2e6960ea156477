//! Durable credential store for redeemd
//!
//! Maps each resource path to the ordered set of redeem codes that unlock
//! it. The table lives in memory behind a read/write lock and is persisted
//! as a JSON document with atomic replace semantics, so a crash never leaves
//! a partially written store on disk.

mod file_store;
mod traits;

pub use file_store::FileStore;
pub use traits::{AddOutcome, CredentialStore};
