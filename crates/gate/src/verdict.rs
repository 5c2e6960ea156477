use std::path::PathBuf;

/// Outcome of a lookup (file read) request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupVerdict {
    /// No redeem code was supplied with the request
    MissingParameter,
    /// The path does not resolve to a servable file under the root
    NotFound,
    /// No code was ever provisioned for this path. Kept distinct from
    /// `InvalidCode`: no authorization exists to fail against.
    Unprovisioned,
    /// A code set exists for this path but the supplied code is not in it
    InvalidCode,
    /// Access granted; carries everything the adapter needs to serve bytes
    Authorized {
        /// Resolved filesystem path of the file
        file: PathBuf,
        /// File size in bytes
        len: u64,
        /// Content type derived from the extension
        mime: &'static str,
        /// Suggested download filename (path basename)
        filename: String,
    },
}

/// Outcome of a provision (code registration) request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionVerdict {
    /// Admin header missing or not equal to the configured secret
    AdminUnauthorized,
    /// New code missing or empty; rejected before the store is consulted
    EmptyCode,
    /// The code is already registered for this path; store unchanged
    DuplicateCode,
    /// The code was registered and persisted
    Provisioned,
}
