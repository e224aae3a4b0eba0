use crate::areas::bridge::Bridge;
use crate::artifacts::branch::tree;
use crate::artifacts::fetch::orchestrator::{BranchState, InitAllReport};
use crate::artifacts::root_changeset::chain::BranchChainBuilder;
use crate::error::Result;
use crate::interop::{GitRepository, TfsRemote, TfsServer};
use anyhow::anyhow;
use std::io::Write;

impl<T: TfsServer, G: GitRepository> Bridge<T, G> {
    /// Discovers every TFS branch under the cloned trunk and initializes all
    /// of them, fetching their history.
    ///
    /// Branch order is arbitrary but a child can only bind once its parent's
    /// root changeset has been fetched, so the work runs as repeated passes
    /// over the branch list until a full pass makes no progress. One branch's
    /// failure never aborts the run; it is recorded and reported at the end.
    pub fn init_all_branches(&self) -> Result<InitAllReport> {
        let default_remote = self.default_remote()?;
        let trunk = default_remote.tfs_repository_path().clone();

        let branches = self.tfs().query_branch_objects(false)?;
        let root = tree::find_root_branch(&branches, &trunk).ok_or_else(|| {
            anyhow!("'{trunk}' is not a TFS branch; branches cannot be discovered from it")
        })?;
        if root.path != trunk {
            return Err(anyhow!(
                "initializing all branches requires a clone made from the trunk; \
                 clone again from '{}'",
                root.path,
            )
            .into());
        }

        let child_paths = tree::descendants_of(&branches, &trunk);
        if child_paths.is_empty() {
            writeln!(self.writer(), "no other TFS branches found under '{trunk}'")?;
            return Ok(InitAllReport::default());
        }

        writeln!(self.writer(), "TFS branches found:")?;
        let chain_builder = BranchChainBuilder::new(self.tfs());
        let all_remotes = self.repository().all_remotes()?;
        let mut states = Vec::with_capacity(child_paths.len() + 1);
        for path in child_paths {
            writeln!(self.writer(), "- {path}")?;
            let existing = all_remotes
                .iter()
                .find(|remote| *remote.tfs_repository_path() == path)
                .cloned();
            let chain = chain_builder.build_chain(&path, None);
            states.push(BranchState::pending(path, existing, chain));
        }
        // The trunk itself only needs catching up, not binding.
        states.push(BranchState::already_bound(trunk, default_remote));

        loop {
            let (next, something_done) = self.run_pass(states)?;
            states = next;
            let work_left = states.iter().any(|state| !state.is_terminal());
            if !work_left || !something_done {
                break;
            }
        }

        let report = InitAllReport::from_states(states);
        if !report.unfetched.is_empty() {
            writeln!(
                self.writer(),
                "warning: some TFS branches could not be initialized:",
            )?;
            for path in &report.unfetched {
                writeln!(self.writer(), "- {path}")?;
            }
        }
        if !report.failed.is_empty() {
            writeln!(
                self.writer(),
                "warning: some TFS branches could not be initialized or entirely fetched:",
            )?;
            for failure in &report.failed {
                writeln!(
                    self.writer(),
                    "- {}\n   => {}",
                    failure.tfs_repository_path, failure.error,
                )?;
            }
        }

        Ok(report)
    }

    /// One pass over the worklist. Returns the replacement states and whether
    /// any branch made observable progress (a binding created or changesets
    /// fetched); a pass without progress means another one would not help.
    fn run_pass(
        &self,
        states: Vec<BranchState<G::Remote>>,
    ) -> Result<(Vec<BranchState<G::Remote>>, bool)> {
        let mut something_done = false;
        let mut next = Vec::with_capacity(states.len());

        for state in states {
            if state.is_terminal() {
                next.push(state);
                continue;
            }
            writeln!(
                self.writer(),
                "=> working on TFS branch: {}",
                state.tfs_repository_path,
            )?;
            let advanced = if state.remote.is_none() {
                self.bind_branch(state, &mut something_done)
            } else {
                self.catch_up_branch(state, &mut something_done)
            };
            next.push(advanced);
        }

        Ok((next, something_done))
    }

    /// First binding of a discovered branch, lenient: a missing root commit
    /// leaves the state pending for a later pass, an error is terminal for
    /// this branch only.
    fn bind_branch(
        &self,
        mut state: BranchState<G::Remote>,
        something_done: &mut bool,
    ) -> BranchState<G::Remote> {
        let attempt: Result<_> = (|| {
            let chain = state.chain.as_deref().unwrap_or_default();
            // Stop on unfetchable merge parents here: a later pass will have
            // fetched the other branch and can pick the history back up.
            let outcome = self.init_branch_chain(
                chain,
                &state.tfs_repository_path,
                None,
                false,
                false,
                true,
            )?;
            if outcome.remote.is_some() {
                for superseded in &outcome.superseded {
                    self.repository().delete_remote(superseded)?;
                }
            }
            Ok(outcome)
        })();

        match attempt {
            Ok(outcome) => {
                if let Some(remote) = outcome.remote {
                    state.remote = Some(remote);
                    state.is_entirely_fetched =
                        outcome.fetch.map(|f| f.is_success).unwrap_or(false);
                    *something_done = true;
                }
                state
            }
            Err(error) => {
                let _ = writeln!(
                    self.writer(),
                    "error: could not initialize '{}'; branch ignored, continuing...",
                    state.tfs_repository_path,
                );
                tracing::warn!(
                    branch = %state.tfs_repository_path,
                    %error,
                    "branch initialization failed"
                );
                state.error = Some(error);
                state
            }
        }
    }

    /// Catches up an already-bound branch. Stops on a changeset whose merge
    /// parent has not been fetched yet; the next pass picks it back up.
    fn catch_up_branch(
        &self,
        mut state: BranchState<G::Remote>,
        something_done: &mut bool,
    ) -> BranchState<G::Remote> {
        let Some(remote) = state.remote.clone() else {
            return state;
        };

        match self.fetch_remote(&remote, true, true) {
            Ok(summary) => {
                state.is_entirely_fetched = summary.is_success;
                if summary.new_changeset_count != 0 {
                    *something_done = true;
                }
            }
            Err(error) => {
                let _ = writeln!(
                    self.writer(),
                    "error: fetching '{}' failed; branch ignored, continuing...",
                    state.tfs_repository_path,
                );
                tracing::warn!(
                    branch = %state.tfs_repository_path,
                    %error,
                    "fetch failed"
                );
                state.error = Some(error);
            }
        }

        state
    }
}
