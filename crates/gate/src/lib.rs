//! Authorization decision logic for redeemd
//!
//! The gate is a pure function of the request intent, the credential store,
//! and the admin credential: it produces a verdict and never touches file
//! bytes or the transport. The decision order is load-bearing; when several
//! conditions hold at once it determines which status the client sees, so it
//! is fixed here and exercised case by case in the tests.

mod admin;
mod gate;
mod mime;
mod resolve;
mod verdict;

pub use admin::{AdminVerifier, SharedSecretVerifier};
pub use gate::AuthorizationGate;
pub use mime::mime_for_extension;
pub use resolve::{FsResolver, ResolvedFile, ResourceResolver};
pub use verdict::{LookupVerdict, ProvisionVerdict};
