//! Worklist types for the all-branches convergence loop
//!
//! Branches are discovered in arbitrary order, but a child cannot be bound
//! until its parent's root commit exists in the git history, which may in
//! turn depend on another branch's fetch. Instead of precomputing a
//! dependency graph, the orchestrator runs passes over this worklist until a
//! full pass makes no progress. Each pass produces replacement state
//! snapshots; `error` and `is_entirely_fetched` are terminal once set.

use crate::artifacts::branch::RootBranch;
use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::objects::commit_id::CommitId;
use crate::error::{Error, Result};
use crate::interop::FetchSummary;

/// Everything needed to bind one chain link, resolved right before fetch.
#[derive(Debug, Clone)]
pub struct BranchCreationRecord {
    pub tfs_repository_path: TfsPath,
    pub git_branch_name_expected: Option<String>,
    pub root_changeset_id: i64,
    pub root_commit: CommitId,
}

/// What a single-branch chain initialization produced.
///
/// `superseded` lists bindings for renamed-away ancestor paths; they were
/// only needed to materialize the rename history and the caller is expected
/// to delete them once the outcome is accepted. `remote` is `None` when a
/// lenient run aborted because a root commit was not available yet.
#[derive(Debug)]
pub struct ChainInitOutcome<R> {
    pub remote: Option<R>,
    pub fetch: Option<FetchSummary>,
    pub superseded: Vec<R>,
}

/// One branch's progress through the convergence loop.
#[derive(Debug)]
pub struct BranchState<R> {
    pub tfs_repository_path: TfsPath,
    pub remote: Option<R>,
    pub is_entirely_fetched: bool,
    /// Creation chain to initialize from; `None` for the already-bound
    /// default branch, which only needs catching up.
    pub chain: Option<Vec<RootBranch>>,
    pub error: Option<Error>,
}

impl<R> BranchState<R> {
    /// A discovered branch waiting for its first binding. A chain-building
    /// failure is terminal for this branch only.
    pub fn pending(
        tfs_repository_path: TfsPath,
        remote: Option<R>,
        chain: Result<Vec<RootBranch>>,
    ) -> Self {
        let (chain, error) = match chain {
            Ok(chain) => (Some(chain), None),
            Err(error) => (None, Some(error)),
        };
        Self {
            tfs_repository_path,
            remote,
            is_entirely_fetched: false,
            chain,
            error,
        }
    }

    /// The default branch: bound by the initial clone, no chain needed.
    pub fn already_bound(tfs_repository_path: TfsPath, remote: R) -> Self {
        Self {
            tfs_repository_path,
            remote: Some(remote),
            is_entirely_fetched: false,
            chain: None,
            error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_entirely_fetched || self.error.is_some()
    }
}

/// Final report of an all-branches run. Unfetched and failed branches are
/// warnings, never process failures: the run still succeeded for the
/// branches that completed.
#[derive(Debug, Default)]
pub struct InitAllReport {
    pub fetched: Vec<TfsPath>,
    /// Branches left behind with no recorded error: their dependency could
    /// never be satisfied, which points at an orchestration defect.
    pub unfetched: Vec<TfsPath>,
    pub failed: Vec<BranchFailure>,
}

#[derive(Debug)]
pub struct BranchFailure {
    pub tfs_repository_path: TfsPath,
    pub error: Error,
}

impl InitAllReport {
    pub fn from_states<R>(states: Vec<BranchState<R>>) -> Self {
        let mut report = InitAllReport::default();
        for state in states {
            match state.error {
                Some(error) => report.failed.push(BranchFailure {
                    tfs_repository_path: state.tfs_repository_path,
                    error,
                }),
                None if state.is_entirely_fetched => {
                    report.fetched.push(state.tfs_repository_path)
                }
                None => report.unfetched.push(state.tfs_repository_path),
            }
        }
        report
    }

    pub fn has_warnings(&self) -> bool {
        !self.unfetched.is_empty() || !self.failed.is_empty()
    }
}
