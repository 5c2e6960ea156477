//! Admin credential verification
//!
//! The current scheme is a single shared secret compared by exact string
//! equality, exactly as the request transmits it. That plaintext comparison
//! is a documented weakness of the system; the trait keeps it replaceable
//! (HMAC-signed tokens, mutual TLS) without touching the gate's decision
//! order.

/// Verifies the credential accompanying a provision request.
/// Return `true` to allow, `false` to reject.
pub trait AdminVerifier: Send + Sync {
    fn verify(&self, supplied: Option<&str>) -> bool;
}

/// Exact-equality check against one shared secret held in process memory
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl AdminVerifier for SharedSecretVerifier {
    fn verify(&self, supplied: Option<&str>) -> bool {
        supplied == Some(self.secret.as_str())
    }
}
