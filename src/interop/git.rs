use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::objects::commit_id::CommitId;
use crate::error::Result;

/// Remote id of the trunk binding created by the initial clone.
pub const DEFAULT_REMOTE_ID: &str = "default";

/// Outcome of fetching changesets over one remote binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub is_success: bool,
    pub new_changeset_count: i64,
}

/// The local binding between a TFVC branch path and a position in the git
/// history. Tracks the latest fetched changeset/commit.
pub trait TfsRemote {
    fn id(&self) -> &str;

    fn tfs_repository_path(&self) -> &TfsPath;

    /// Highest changeset fetched so far, if any.
    fn max_changeset_id(&self) -> Option<i64>;

    /// Commit the binding currently points at, if any changeset was fetched.
    fn max_commit(&self) -> Option<CommitId>;

    /// Fetch changesets newer than `max_changeset_id` into the git history.
    fn fetch(&self, stop_on_failed_merge: bool) -> Result<FetchSummary>;

    /// Drop the on-disk working area used while materializing changesets.
    fn cleanup_workspace(&self) -> Result<()>;
}

/// The target git history: commit lookup, branch refs and remote bindings.
pub trait GitRepository {
    type Remote: TfsRemote + Clone;

    /// Commit produced for a given TFVC changeset, if that changeset was
    /// already fetched through any binding.
    fn find_commit_by_changeset_id(&self, changeset_id: i64) -> Result<Option<CommitId>>;

    /// Create a local branch ref pointing at `commit`. Returns false when the
    /// ref could not be written (reported as a warning, not an error).
    fn create_branch(&self, name: &str, commit: &CommitId) -> Result<bool>;

    fn all_remotes(&self) -> Result<Vec<Self::Remote>>;

    fn remote(&self, id: &str) -> Result<Option<Self::Remote>>;

    /// Create a binding for `path` rooted at `root_commit`, or return the
    /// existing one for that path. Idempotence matters: the convergence loop
    /// may retry a chain whose earlier links already got their binding.
    fn init_remote(
        &self,
        path: &TfsPath,
        root_commit: &CommitId,
        git_branch_name: Option<&str>,
    ) -> Result<Self::Remote>;

    fn delete_remote(&self, remote: &Self::Remote) -> Result<()>;
}
