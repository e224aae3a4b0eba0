//! Branch-tree discovery over the server's branch-object catalog
//!
//! The server reports branches as a flat list of (path, parent) pairs. These
//! helpers rebuild the tree shape the orchestrator needs: the topological root
//! a branch belongs to, and all descendants of a root.

use crate::artifacts::branch::tfs_path::TfsPath;
use crate::interop::BranchObject;

/// Walks parent links up from `path` to the root of the branch tree that
/// contains it. Returns `None` when `path` is not a known branch at all.
pub fn find_root_branch<'a>(
    branches: &'a [BranchObject],
    path: &TfsPath,
) -> Option<&'a BranchObject> {
    let mut current = branches.iter().find(|b| b.path == *path)?;

    while let Some(parent_path) = &current.parent_path {
        match branches.iter().find(|b| b.path == *parent_path) {
            Some(parent) => current = parent,
            // Parent known by name only (e.g. deleted and filtered out);
            // the last resolvable ancestor is the best root we can report.
            None => break,
        }
    }

    Some(current)
}

/// All transitive children of `root`, in catalog order.
pub fn descendants_of(branches: &[BranchObject], root: &TfsPath) -> Vec<TfsPath> {
    let mut descendants: Vec<TfsPath> = Vec::new();
    let mut frontier = vec![root.clone()];

    while let Some(current) = frontier.pop() {
        for branch in branches {
            if branch.parent_path.as_ref() == Some(&current) {
                descendants.push(branch.path.clone());
                frontier.push(branch.path.clone());
            }
        }
    }

    descendants
}
