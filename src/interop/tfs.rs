use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::changeset::{ChangesetSummary, ExtendedMerge};
use crate::error::Result;

/// One branch as known to the server's branch-object catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchObject {
    pub path: TfsPath,
    pub parent_path: Option<TfsPath>,
    pub is_deleted: bool,
}

impl BranchObject {
    pub fn is_root(&self) -> bool {
        self.parent_path.is_none()
    }
}

/// History queries against the TFVC server.
///
/// Every query may fail with [`Error::FeatureNotSupported`] on servers that
/// predate branch objects; callers recover by switching to the legacy
/// strategy, never by guessing.
///
/// [`Error::FeatureNotSupported`]: crate::error::Error::FeatureNotSupported
pub trait TfsServer {
    /// Whether the server can report branch ancestry at all. Old servers
    /// model branches as plain folders and cannot.
    fn can_get_branch_information(&self) -> bool;

    /// All branch objects, recursively. Deleted branches are filtered out
    /// unless explicitly requested.
    fn query_branch_objects(&self, include_deleted: bool) -> Result<Vec<BranchObject>>;

    /// The first-ever revision of `path` (oldest changeset touching the
    /// branch, recursive scope).
    fn query_earliest_changeset(&self, path: &TfsPath) -> Result<ChangesetSummary>;

    /// Cross-branch merge tracking for one revision of `branch` against the
    /// candidate parents. Record order is the server's; callers sort.
    fn query_merge_tracking(
        &self,
        changeset_id: i64,
        branch: &TfsPath,
        candidate_parents: &[TfsPath],
    ) -> Result<Vec<ExtendedMerge>>;

    /// Root-changeset lookup for servers without branch ancestry. Needs the
    /// parent spelled out by the caller and cannot detect renames.
    fn legacy_root_changeset(&self, branch: &TfsPath, parent: &TfsPath) -> Result<i64>;
}
