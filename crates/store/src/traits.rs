use redeemd_core::Result;

/// Outcome of an append attempt for one (path, code) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The code was appended and persisted
    Added,
    /// The code was already registered for this path; nothing changed
    AlreadyPresent,
}

/// Durable multimap of resource path to redeem codes.
///
/// `add_code` is a single check-then-append critical section per path: of two
/// concurrent calls with the same path and code, exactly one observes
/// [`AddOutcome::Added`]. Readers never see a partially appended set.
pub trait CredentialStore: Send + Sync {
    /// Snapshot of the codes registered for `path`, in insertion order.
    /// `None` means the path was never provisioned, which callers must keep
    /// distinct from an empty or non-matching set.
    fn codes_for(&self, path: &str) -> Option<Vec<String>>;

    /// Atomically register `code` for `path`, creating the set on first use.
    /// Callers validate that `code` is non-empty before calling.
    fn add_code(&self, path: &str, code: &str) -> Result<AddOutcome>;
}
