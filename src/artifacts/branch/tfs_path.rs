use crate::artifacts::branch::TFS_PATH_REGEX;
use anyhow::Context;
use std::hash::{Hash, Hasher};

/// Server-side repository path identifying a TFVC branch (e.g. `$/Repo/Trunk`).
///
/// TFVC treats paths as case-insensitive, so equality and hashing fold case.
/// Trailing slashes are trimmed on parse; the server never reports them.
#[derive(Debug, Clone)]
pub struct TfsPath(String);

impl TfsPath {
    pub fn try_parse(path: &str) -> anyhow::Result<Self> {
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            anyhow::bail!("TFS path cannot be empty");
        }

        let re = regex::Regex::new(TFS_PATH_REGEX)
            .with_context(|| format!("invalid TFS path regex: {TFS_PATH_REGEX}"))?;

        if !re.is_match(path) {
            anyhow::bail!("invalid TFS path: {} (expected a $/... server path)", path);
        }

        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, used as a fallback git branch name.
    pub fn leaf(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl PartialEq for TfsPath {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for TfsPath {}

impl Hash for TfsPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl AsRef<str> for TfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TfsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
