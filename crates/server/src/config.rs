use redeemd_core::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Process-start configuration for the server. Built once by the CLI and
/// validated before anything binds or opens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory the served files live under
    pub root: PathBuf,
    /// Location of the credential store document
    pub store: PathBuf,
    /// Address to listen on
    pub listen: SocketAddr,
    /// Shared admin secret for provisioning
    pub admin_key: String,
}

impl ServerConfig {
    /// Check the parts that must hold before startup proceeds: the serving
    /// root exists and is a directory, and the admin key is non-empty.
    /// Returns the config with the root canonicalized.
    pub fn validate(mut self) -> Result<Self> {
        if self.admin_key.is_empty() {
            return Err(Error::configuration("admin key must not be empty"));
        }

        let root = self
            .root
            .canonicalize()
            .map_err(|e| Error::file_system(&self.root, "canonicalize serving root", e))?;
        if !root.is_dir() {
            return Err(Error::configuration(format!(
                "serving root '{}' is not a directory",
                root.display()
            )));
        }
        self.root = root;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(root: PathBuf, admin_key: &str) -> ServerConfig {
        ServerConfig {
            root,
            store: PathBuf::from("/tmp/codes.json"),
            listen: "127.0.0.1:0".parse().unwrap(),
            admin_key: admin_key.to_string(),
        }
    }

    #[test]
    fn accepts_existing_directory() {
        let dir = TempDir::new().unwrap();
        let validated = config(dir.path().to_path_buf(), "secret").validate().unwrap();
        assert!(validated.root.is_absolute());
    }

    #[test]
    fn rejects_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(config(missing, "secret").validate().is_err());
    }

    #[test]
    fn rejects_empty_admin_key() {
        let dir = TempDir::new().unwrap();
        assert!(config(dir.path().to_path_buf(), "").validate().is_err());
    }
}
