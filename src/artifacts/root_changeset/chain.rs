//! Rename-chain walking
//!
//! A branch may have been renamed from an earlier branch, which may itself
//! have been renamed, and so on back to the true creation point. The chain
//! builder walks that history backward and returns the links oldest ancestor
//! first, which is the order they must be initialized in.

use crate::artifacts::branch::RootBranch;
use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::root_changeset::resolver::RootChangesetResolver;
use crate::error::{Error, Result};
use crate::interop::TfsServer;

pub struct BranchChainBuilder<'a, T: TfsServer> {
    resolver: RootChangesetResolver<'a, T>,
}

impl<'a, T: TfsServer> BranchChainBuilder<'a, T> {
    pub fn new(tfs: &'a T) -> Self {
        Self {
            resolver: RootChangesetResolver::new(tfs),
        }
    }

    /// Walks the rename chain backward from `branch_path`.
    ///
    /// Never returns an empty chain. The parent hint only applies to the
    /// requested branch itself; renamed-from ancestors carry their own
    /// ancestry. `RootBranchHasNoParent` is fatal on the first resolution
    /// (the request itself targets a root, which must be cloned instead) but
    /// terminates the walk normally on later ones: reaching a true root is
    /// how a chain ends.
    pub fn build_chain(
        &self,
        branch_path: &TfsPath,
        parent_hint: Option<&TfsPath>,
    ) -> Result<Vec<RootBranch>> {
        // Walk order: requested branch first, then progressively older
        // renamed-from ancestors.
        let mut links: Vec<(TfsPath, i64)> = Vec::new();
        let mut current = branch_path.clone();
        let mut hint = parent_hint;

        loop {
            match self.resolver.resolve(&current, hint) {
                Ok(resolved) => {
                    links.push((current.clone(), resolved.root_changeset_id));
                    match resolved.renamed_from {
                        Some(older) => {
                            current = older;
                            hint = None;
                        }
                        None => break,
                    }
                }
                Err(Error::RootBranchHasNoParent(_)) if !links.is_empty() => {
                    // An ancestor in the chain turned out to be a root: the
                    // walk is complete, not broken.
                    break;
                }
                Err(error) => return Err(error),
            }
        }

        let chain = links
            .into_iter()
            .rev()
            .enumerate()
            .map(|(index, (tfs_branch_path, root_changeset_id))| RootBranch {
                tfs_branch_path,
                root_changeset_id,
                is_renamed_branch: index != 0,
            })
            .collect::<Vec<_>>();

        tracing::debug!(links = chain.len(), branch = %branch_path, "built creation chain");

        Ok(chain)
    }
}
