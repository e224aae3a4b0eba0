use crate::artifacts::changeset::ChangeType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of branch initialization.
///
/// `RootBranchHasNoParent` and `RootCommitMissing` are expected control-flow
/// signals rather than defects: the former terminates a rename-chain walk, the
/// latter tells the all-branches loop to retry a branch on a later pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error("branch {0} not found on the TFS server")]
    BranchNotFound(String),

    #[error(
        "branch {0} is a root branch (it has no parent); clone it from TFS instead of initializing it"
    )]
    RootBranchHasNoParent(String),

    #[error("failed to find the root changeset for branch {branch} in parent branch {parent}")]
    AmbiguousHistory { branch: String, parent: String },

    #[error(
        "don't know how to find the root changeset for a merge record of change type {change_type:?}"
    )]
    UnsupportedChangeType { change_type: ChangeType },

    #[error("the root changeset C{0} has no corresponding commit in the git repository")]
    RootCommitMissing(i64),

    #[error("a parent branch is required to initialize {0} against this server version")]
    ParentBranchRequired(String),

    #[error("the TFS server does not support {0}")]
    FeatureNotSupported(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// True for the "dependency not ready yet" signal the all-branches loop
    /// recovers from by retrying the branch on a later pass.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RootCommitMissing(_))
    }
}
