use serde::{Deserialize, Serialize};
use std::fmt;

/// The request path identifying one servable resource, used verbatim as the
/// credential store key. Always begins with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Create a resource path from a request path, normalizing the leading
    /// slash so `a.txt` and `/a.txt` name the same resource.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{path}"))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path relative to the serving root (no leading slash).
    #[must_use]
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    /// Final path component, used as the suggested download filename.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or("")
    }

    /// Extension of the final component, if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.basename();
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque redeem code. Non-empty, case-sensitive, compared only for exact
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RedeemCode(String);

impl RedeemCode {
    /// Create a redeem code, rejecting empty strings.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedeemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_path_normalizes_leading_slash() {
        assert_eq!(ResourcePath::new("a.txt").as_str(), "/a.txt");
        assert_eq!(ResourcePath::new("/a.txt").as_str(), "/a.txt");
    }

    #[test]
    fn resource_path_components() {
        let path = ResourcePath::new("/docs/report.pdf");
        assert_eq!(path.relative(), "docs/report.pdf");
        assert_eq!(path.basename(), "report.pdf");
        assert_eq!(path.extension(), Some("pdf"));
    }

    #[test]
    fn extension_absent_for_dotfiles_and_bare_names() {
        assert_eq!(ResourcePath::new("/README").extension(), None);
        assert_eq!(ResourcePath::new("/.gitignore").extension(), None);
        assert_eq!(ResourcePath::new("/archive.").extension(), None);
    }

    #[test]
    fn redeem_code_rejects_empty() {
        assert!(RedeemCode::new("").is_none());
        assert_eq!(RedeemCode::new("ABC").unwrap().as_str(), "ABC");
    }
}
