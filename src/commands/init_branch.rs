use crate::areas::bridge::Bridge;
use crate::artifacts::branch::RootBranch;
use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::fetch::orchestrator::{BranchCreationRecord, ChainInitOutcome};
use crate::artifacts::root_changeset::chain::BranchChainBuilder;
use crate::error::{Error, Result};
use crate::interop::{GitRepository, TfsRemote, TfsServer};
use anyhow::anyhow;
use std::io::Write;

impl<T: TfsServer, G: GitRepository> Bridge<T, G> {
    /// Binds one TFS branch to the git repository and fetches its history.
    ///
    /// When the branch descends from renamed-away ancestors, those are bound
    /// and fetched first (oldest ancestor first) so the rename points exist
    /// in the git history, then their bindings are deleted: only the
    /// requested branch keeps a remote. `no_fetch` skips fetching the
    /// requested branch but never its ancestors.
    pub fn init_branch(
        &self,
        tfs_branch_path: &str,
        git_branch_name: Option<&str>,
        parent_hint: Option<&str>,
        no_fetch: bool,
    ) -> Result<G::Remote> {
        let branch_path = TfsPath::try_parse(tfs_branch_path)?;
        self.default_remote()?;

        let all_remotes = self.repository().all_remotes()?;
        if all_remotes
            .iter()
            .any(|remote| *remote.tfs_repository_path() == branch_path)
        {
            writeln!(
                self.writer(),
                "warning: a remote already mirrors '{branch_path}'; branch ignored!",
            )?;
            return Err(anyhow!("a remote for '{branch_path}' already exists").into());
        }

        let parent_hint = match parent_hint {
            Some(hint) => {
                let hint = TfsPath::try_parse(hint)?;
                // A hint only helps if its history is already available
                // locally, which means it must have been initialized itself.
                if !all_remotes
                    .iter()
                    .any(|remote| *remote.tfs_repository_path() == hint)
                {
                    return Err(anyhow!(
                        "the parent branch '{hint}' is not initialized in this repository; \
                         initialize it first",
                    )
                    .into());
                }
                Some(hint)
            }
            None => None,
        };

        let chain =
            BranchChainBuilder::new(self.tfs()).build_chain(&branch_path, parent_hint.as_ref())?;

        let outcome =
            self.init_branch_chain(&chain, &branch_path, git_branch_name, true, no_fetch, false)?;
        for superseded in &outcome.superseded {
            self.repository().delete_remote(superseded)?;
        }

        outcome
            .remote
            .ok_or_else(|| anyhow!("no binding was created for '{branch_path}'").into())
    }

    /// Initializes every link of a creation chain in order.
    ///
    /// `strict` controls what happens when a link's root changeset has no
    /// commit in the git history yet: a strict run fails with
    /// [`Error::RootCommitMissing`], a lenient run returns early with no
    /// binding so the caller can retry once more history is available.
    /// Either way no binding is created for the stalled link or anything
    /// after it.
    ///
    /// Non-final links are rename sources: they are always fetched (their
    /// rename point must exist before the next link can bind) and their
    /// bindings are handed back in `superseded` for the caller to delete.
    pub(crate) fn init_branch_chain(
        &self,
        chain: &[RootBranch],
        requested: &TfsPath,
        git_branch_name: Option<&str>,
        strict: bool,
        no_fetch: bool,
        stop_on_failed_merge: bool,
    ) -> Result<ChainInitOutcome<G::Remote>> {
        if chain.len() > 1 {
            writeln!(self.writer(), "branches to initialize successively:")?;
            for link in chain {
                writeln!(
                    self.writer(),
                    "- {} (root changeset C{})",
                    link.tfs_branch_path,
                    link.root_changeset_id,
                )?;
            }
        }

        let mut remote = None;
        let mut fetch = None;
        let mut superseded = Vec::new();

        for (index, link) in chain.iter().enumerate() {
            let is_rename_source = index + 1 != chain.len();
            tracing::debug!(
                branch = %link.tfs_branch_path,
                root_changeset = link.root_changeset_id,
                renamed = link.is_renamed_branch,
                "initializing chain link"
            );

            let Some(root_commit) = self
                .repository()
                .find_commit_by_changeset_id(link.root_changeset_id)?
            else {
                if strict {
                    return Err(Error::RootCommitMissing(link.root_changeset_id));
                }
                tracing::debug!(
                    root_changeset = link.root_changeset_id,
                    "root changeset not fetched yet, leaving the branch for a later pass"
                );
                return Ok(ChainInitOutcome {
                    remote: None,
                    fetch: None,
                    superseded,
                });
            };

            writeln!(
                self.writer(),
                "initializing TFS branch '{}' from commit {} (C{})",
                link.tfs_branch_path,
                root_commit.to_short(),
                link.root_changeset_id,
            )?;

            let record = BranchCreationRecord {
                tfs_repository_path: link.tfs_branch_path.clone(),
                git_branch_name_expected: (link.tfs_branch_path == *requested)
                    .then(|| git_branch_name.map(str::to_owned))
                    .flatten(),
                root_changeset_id: link.root_changeset_id,
                root_commit,
            };

            let link_remote = self.repository().init_remote(
                &record.tfs_repository_path,
                &record.root_commit,
                record.git_branch_name_expected.as_deref(),
            )?;

            if !no_fetch || is_rename_source {
                let summary =
                    self.fetch_remote(&link_remote, stop_on_failed_merge, !is_rename_source)?;
                if summary.is_success && is_rename_source {
                    superseded.push(link_remote.clone());
                }
                fetch = Some(summary);
            } else {
                tracing::debug!(branch = %link.tfs_branch_path, "fetch skipped on request");
            }

            remote = Some(link_remote);
        }

        Ok(ChainInitOutcome {
            remote,
            fetch,
            superseded,
        })
    }
}
