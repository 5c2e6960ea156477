use crate::admin::AdminVerifier;
use crate::mime::mime_for_extension;
use crate::resolve::ResourceResolver;
use crate::verdict::{LookupVerdict, ProvisionVerdict};
use redeemd_core::{RedeemCode, ResourcePath, Result};
use redeemd_store::{AddOutcome, CredentialStore};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless authorization decisions over an injected store, resolver, and
/// admin verifier. One instance is shared across all requests.
pub struct AuthorizationGate {
    store: Arc<dyn CredentialStore>,
    resolver: Arc<dyn ResourceResolver>,
    admin: Arc<dyn AdminVerifier>,
}

impl AuthorizationGate {
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        resolver: Arc<dyn ResourceResolver>,
        admin: Arc<dyn AdminVerifier>,
    ) -> Self {
        Self {
            store,
            resolver,
            admin,
        }
    }

    /// Decide a file-read request. Never mutates the store.
    ///
    /// The checks run strictly in this order; when several conditions hold
    /// at once the first one wins and picks the status the client sees:
    /// missing parameter, then resolution failure, then never-provisioned,
    /// then wrong code.
    pub fn lookup(&self, path: &ResourcePath, supplied: Option<&str>) -> LookupVerdict {
        let Some(supplied) = supplied else {
            debug!(path = %path, "lookup without redeem code");
            return LookupVerdict::MissingParameter;
        };

        let Some(resolved) = self.resolver.resolve(path) else {
            debug!(path = %path, "lookup for unresolvable path");
            return LookupVerdict::NotFound;
        };

        let Some(codes) = self.store.codes_for(path.as_str()) else {
            debug!(path = %path, "lookup for unprovisioned path");
            return LookupVerdict::Unprovisioned;
        };

        if !codes.iter().any(|c| c == supplied) {
            warn!(path = %path, "invalid redeem code presented");
            return LookupVerdict::InvalidCode;
        }

        debug!(path = %path, "lookup authorized");
        LookupVerdict::Authorized {
            mime: mime_for_extension(path.extension()),
            filename: path.basename().to_string(),
            len: resolved.len,
            file: resolved.file,
        }
    }

    /// Decide a code-registration request. Mutates the store exactly once,
    /// on the `Provisioned` outcome, and never otherwise.
    ///
    /// Errors are genuine store faults (persistence I/O), not decision
    /// outcomes; the adapter renders them as a server error.
    pub fn provision(
        &self,
        path: &ResourcePath,
        admin_value: Option<&str>,
        new_code: Option<&str>,
    ) -> Result<ProvisionVerdict> {
        if !self.admin.verify(admin_value) {
            warn!(path = %path, "provision with bad admin credential");
            return Ok(ProvisionVerdict::AdminUnauthorized);
        }

        // Empty codes are rejected here, before the store sees them; the
        // store can assume its callers validated.
        let Some(code) = new_code.and_then(RedeemCode::new) else {
            debug!(path = %path, "provision with empty redeem code");
            return Ok(ProvisionVerdict::EmptyCode);
        };

        match self.store.add_code(path.as_str(), code.as_str())? {
            AddOutcome::AlreadyPresent => {
                debug!(path = %path, "duplicate redeem code");
                Ok(ProvisionVerdict::DuplicateCode)
            }
            AddOutcome::Added => {
                debug!(path = %path, "redeem code provisioned");
                Ok(ProvisionVerdict::Provisioned)
            }
        }
    }
}
