pub mod tfs_path;
pub mod tree;

use crate::artifacts::branch::tfs_path::TfsPath;

pub const TFS_PATH_REGEX: &str = r"^\$\/.+";

/// One link in a branch creation/rename chain.
///
/// A chain is ordered oldest ancestor first and ends with the branch that was
/// requested. Only the oldest link carries `is_renamed_branch == false`: it is
/// the true creation point, while every later link exists because the branch
/// was renamed into a new path at `root_changeset_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootBranch {
    pub tfs_branch_path: TfsPath,
    pub root_changeset_id: i64,
    pub is_renamed_branch: bool,
}
