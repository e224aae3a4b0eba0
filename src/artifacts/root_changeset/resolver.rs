//! Root-changeset resolution for one branch path
//!
//! Two strategies, picked up front by a capability check instead of a caught
//! failure: servers that expose branch ancestry get the merge-history walk,
//! legacy servers get a caller-hinted fallback lookup. A `FeatureNotSupported`
//! answer from any query downgrades to the fallback as well.

use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::root_changeset::classifier::relevant_changeset;
use crate::error::{Error, Result};
use crate::interop::TfsServer;

/// Where one branch's own history begins.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoot {
    /// The changeset at which the branch diverged from (or was renamed into
    /// existence within) its parent.
    pub root_changeset_id: i64,
    pub parent_branch: TfsPath,
    /// Set when the branch was renamed from an earlier path; the chain walk
    /// continues there.
    pub renamed_from: Option<TfsPath>,
}

pub struct RootChangesetResolver<'a, T: TfsServer> {
    tfs: &'a T,
}

impl<'a, T: TfsServer> RootChangesetResolver<'a, T> {
    pub fn new(tfs: &'a T) -> Self {
        Self { tfs }
    }

    pub fn resolve(
        &self,
        branch_path: &TfsPath,
        parent_hint: Option<&TfsPath>,
    ) -> Result<ResolvedRoot> {
        tracing::debug!(branch = %branch_path, "looking for root changeset");

        if !self.tfs.can_get_branch_information() {
            tracing::debug!("server cannot report branch ancestry, using legacy resolution");
            return self.resolve_legacy(branch_path, parent_hint);
        }

        match self.resolve_from_merge_history(branch_path, parent_hint) {
            Err(Error::FeatureNotSupported(feature)) => {
                tracing::debug!(feature, "server refused a history query, using legacy resolution");
                self.resolve_legacy(branch_path, parent_hint)
            }
            other => other,
        }
    }

    fn resolve_from_merge_history(
        &self,
        branch_path: &TfsPath,
        parent_hint: Option<&TfsPath>,
    ) -> Result<ResolvedRoot> {
        let branches = self.tfs.query_branch_objects(true)?;
        let branch = branches
            .iter()
            .find(|b| b.path == *branch_path)
            .ok_or_else(|| Error::BranchNotFound(branch_path.to_string()))?;

        let parent_branch = branch
            .parent_path
            .clone()
            .ok_or_else(|| Error::RootBranchHasNoParent(branch_path.to_string()))?;

        if parent_hint.is_some() {
            tracing::debug!(
                "parent branch hint ignored: this server reports ancestry itself"
            );
        }
        tracing::debug!(parent = %parent_branch, "found parent branch");

        let first_changeset = self.tfs.query_earliest_changeset(branch_path)?;

        let mut merges = self.tfs.query_merge_tracking(
            first_changeset.changeset_id,
            branch_path,
            std::slice::from_ref(&parent_branch),
        )?;
        merges.sort_by_key(|m| m.source_changeset.changeset_id);

        let relevant = relevant_changeset(&merges, &parent_branch, branch_path)?;
        if let Some(renamed_from) = &relevant.renamed_from {
            tracing::debug!(
                "found original branch {} (renamed into {})",
                renamed_from,
                branch_path
            );
        }

        Ok(ResolvedRoot {
            root_changeset_id: relevant.changeset.changeset_id,
            parent_branch,
            renamed_from: relevant.renamed_from,
        })
    }

    fn resolve_legacy(
        &self,
        branch_path: &TfsPath,
        parent_hint: Option<&TfsPath>,
    ) -> Result<ResolvedRoot> {
        let parent_branch = parent_hint
            .ok_or_else(|| Error::ParentBranchRequired(branch_path.to_string()))?;

        let root_changeset_id = self.tfs.legacy_root_changeset(branch_path, parent_branch)?;

        // Legacy servers cannot report renames, so the chain never continues.
        Ok(ResolvedRoot {
            root_changeset_id,
            parent_branch: parent_branch.clone(),
            renamed_from: None,
        })
    }
}
