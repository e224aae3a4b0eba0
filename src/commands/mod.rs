//! User-facing operations, implemented as impl blocks on [`Bridge`]
//!
//! - `init_branch`: bind a single TFS branch (and its renamed-away ancestors)
//!   to the git repository
//! - `init_all_branches`: discover every branch under the cloned trunk and
//!   initialize them all, converging over repeated passes
//!
//! [`Bridge`]: crate::areas::bridge::Bridge

pub mod init_all_branches;
pub mod init_branch;

use crate::areas::bridge::Bridge;
use crate::error::Result;
use crate::interop::{DEFAULT_REMOTE_ID, FetchSummary, GitRepository, TfsRemote, TfsServer};
use std::io::Write;

impl<T: TfsServer, G: GitRepository> Bridge<T, G> {
    /// Fetches changesets over `remote`, points the local branch ref at the
    /// result when asked, and always drops the materialization workspace.
    ///
    /// The default remote never gets a branch ref: the clone already created
    /// the primary branch for it.
    pub(crate) fn fetch_remote(
        &self,
        remote: &G::Remote,
        stop_on_failed_merge: bool,
        create_branch: bool,
    ) -> Result<FetchSummary> {
        tracing::debug!(
            remote = remote.id(),
            last_changeset = ?remote.max_changeset_id(),
            "fetching changesets"
        );
        let summary = remote.fetch(stop_on_failed_merge)?;
        tracing::debug!(
            remote = remote.id(),
            new_changesets = summary.new_changeset_count,
            success = summary.is_success,
            "fetch finished"
        );

        if summary.is_success && create_branch && remote.id() != DEFAULT_REMOTE_ID {
            if let Some(commit) = remote.max_commit() {
                let ref_name = format!("refs/heads/{}", remote.id());
                if !self.repository().create_branch(&ref_name, &commit)? {
                    writeln!(
                        self.writer(),
                        "warning: could not create the local branch '{}'",
                        remote.id(),
                    )?;
                }
            }
        }

        remote.cleanup_workspace()?;

        Ok(summary)
    }
}
