//! In-memory git repository with scripted per-branch fetches.
//!
//! Fetching a branch materializes the changesets its script lists, one commit
//! per changeset, into a history shared by every remote. That shared history
//! is what lets one branch's fetch unblock another branch's binding.

use git_tfvc::artifacts::branch::tfs_path::TfsPath;
use git_tfvc::artifacts::objects::CommitId;
use git_tfvc::error::Result;
use git_tfvc::interop::{DEFAULT_REMOTE_ID, FetchSummary, GitRepository, TfsRemote};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

/// One changeset a fetch materializes, in script order.
#[derive(Debug, Clone, Copy)]
pub enum ScriptedChangeset {
    Plain(i64),
    /// A merge commit whose other parent lives on another branch. When that
    /// parent changeset has not been fetched yet, a stop-on-failed-merge
    /// fetch ends right before it (unsuccessfully); a regular fetch commits
    /// it without the merge parent.
    MergeFrom { id: i64, merge_parent: i64 },
}

pub fn changesets(ids: &[i64]) -> Vec<ScriptedChangeset> {
    ids.iter().copied().map(ScriptedChangeset::Plain).collect()
}

#[derive(Debug)]
struct RemoteState {
    path: TfsPath,
    max_changeset_id: Option<i64>,
}

#[derive(Debug, Default)]
struct GitState {
    commits: HashMap<i64, CommitId>,
    remotes: BTreeMap<String, RemoteState>,
    branch_refs: BTreeMap<String, CommitId>,
    deleted_remote_ids: Vec<String>,
    scripts: HashMap<TfsPath, Vec<ScriptedChangeset>>,
    failing_fetches: HashSet<TfsPath>,
    refuse_branch_refs: bool,
    fetched_changeset_total: i64,
    workspace_cleanups: usize,
}

#[derive(Clone)]
pub struct FakeRepository {
    state: Rc<RefCell<GitState>>,
}

impl FakeRepository {
    /// A repository whose trunk was already cloned: the default remote exists
    /// and `fetched` changesets are in the history.
    pub fn cloned_from(trunk: &str, fetched: &[i64]) -> Self {
        let mut state = GitState::default();
        for &id in fetched {
            state.commits.insert(id, super::commit_for(id));
        }
        state.remotes.insert(
            DEFAULT_REMOTE_ID.to_string(),
            RemoteState {
                path: super::path(trunk),
                max_changeset_id: fetched.iter().copied().max(),
            },
        );
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// A repository with no TFVC clone at all.
    pub fn uncloned() -> Self {
        Self {
            state: Rc::new(RefCell::new(GitState::default())),
        }
    }

    pub fn with_fetch_script(self, branch: &str, script: Vec<ScriptedChangeset>) -> Self {
        self.state
            .borrow_mut()
            .scripts
            .insert(super::path(branch), script);
        self
    }

    pub fn with_failing_fetch(self, branch: &str) -> Self {
        self.state
            .borrow_mut()
            .failing_fetches
            .insert(super::path(branch));
        self
    }

    pub fn refusing_branch_refs(self) -> Self {
        self.state.borrow_mut().refuse_branch_refs = true;
        self
    }

    pub fn remote_ids(&self) -> Vec<String> {
        self.state.borrow().remotes.keys().cloned().collect()
    }

    pub fn deleted_remote_ids(&self) -> Vec<String> {
        self.state.borrow().deleted_remote_ids.clone()
    }

    pub fn branch_ref(&self, name: &str) -> Option<CommitId> {
        self.state.borrow().branch_refs.get(name).cloned()
    }

    pub fn has_commit_for(&self, changeset_id: i64) -> bool {
        self.state.borrow().commits.contains_key(&changeset_id)
    }

    /// Changesets fetched since construction, across all remotes.
    pub fn fetched_changeset_total(&self) -> i64 {
        self.state.borrow().fetched_changeset_total
    }

    pub fn workspace_cleanups(&self) -> usize {
        self.state.borrow().workspace_cleanups
    }
}

#[derive(Clone, Debug)]
pub struct FakeRemote {
    id: String,
    path: TfsPath,
    state: Rc<RefCell<GitState>>,
}

impl TfsRemote for FakeRemote {
    fn id(&self) -> &str {
        &self.id
    }

    fn tfs_repository_path(&self) -> &TfsPath {
        &self.path
    }

    fn max_changeset_id(&self) -> Option<i64> {
        self.state
            .borrow()
            .remotes
            .get(&self.id)
            .and_then(|r| r.max_changeset_id)
    }

    fn max_commit(&self) -> Option<CommitId> {
        let state = self.state.borrow();
        let max = state.remotes.get(&self.id)?.max_changeset_id?;
        state.commits.get(&max).cloned()
    }

    fn fetch(&self, stop_on_failed_merge: bool) -> Result<FetchSummary> {
        let mut state = self.state.borrow_mut();
        if state.failing_fetches.contains(&self.path) {
            return Err(anyhow::anyhow!("connection reset while fetching '{}'", self.path).into());
        }

        let script = state.scripts.get(&self.path).cloned().unwrap_or_default();
        let mut max = state
            .remotes
            .get(&self.id)
            .expect("fetch on a deleted remote")
            .max_changeset_id;
        let mut new_changeset_count = 0;
        let mut is_success = true;

        for step in script {
            let (id, merge_parent) = match step {
                ScriptedChangeset::Plain(id) => (id, None),
                ScriptedChangeset::MergeFrom { id, merge_parent } => (id, Some(merge_parent)),
            };
            if Some(id) <= max {
                continue;
            }
            if let Some(parent) = merge_parent {
                if !state.commits.contains_key(&parent) && stop_on_failed_merge {
                    is_success = false;
                    break;
                }
            }
            state.commits.insert(id, super::commit_for(id));
            max = Some(id);
            new_changeset_count += 1;
        }

        state
            .remotes
            .get_mut(&self.id)
            .expect("fetch on a deleted remote")
            .max_changeset_id = max;
        state.fetched_changeset_total += new_changeset_count;

        Ok(FetchSummary {
            is_success,
            new_changeset_count,
        })
    }

    fn cleanup_workspace(&self) -> Result<()> {
        self.state.borrow_mut().workspace_cleanups += 1;
        Ok(())
    }
}

impl GitRepository for FakeRepository {
    type Remote = FakeRemote;

    fn find_commit_by_changeset_id(&self, changeset_id: i64) -> Result<Option<CommitId>> {
        Ok(self.state.borrow().commits.get(&changeset_id).cloned())
    }

    fn create_branch(&self, name: &str, commit: &CommitId) -> Result<bool> {
        let mut state = self.state.borrow_mut();
        if state.refuse_branch_refs {
            return Ok(false);
        }
        state.branch_refs.insert(name.to_string(), commit.clone());
        Ok(true)
    }

    fn all_remotes(&self) -> Result<Vec<FakeRemote>> {
        let state = self.state.borrow();
        Ok(state
            .remotes
            .iter()
            .map(|(id, remote)| FakeRemote {
                id: id.clone(),
                path: remote.path.clone(),
                state: Rc::clone(&self.state),
            })
            .collect())
    }

    fn remote(&self, id: &str) -> Result<Option<FakeRemote>> {
        let state = self.state.borrow();
        Ok(state.remotes.get(id).map(|remote| FakeRemote {
            id: id.to_string(),
            path: remote.path.clone(),
            state: Rc::clone(&self.state),
        }))
    }

    fn init_remote(
        &self,
        path: &TfsPath,
        root_commit: &CommitId,
        git_branch_name: Option<&str>,
    ) -> Result<FakeRemote> {
        let mut state = self.state.borrow_mut();
        if let Some((id, remote)) = state.remotes.iter().find(|(_, r)| r.path == *path) {
            return Ok(FakeRemote {
                id: id.clone(),
                path: remote.path.clone(),
                state: Rc::clone(&self.state),
            });
        }

        let id = git_branch_name
            .map(str::to_owned)
            .unwrap_or_else(|| path.leaf().to_owned());
        // The binding starts at the changeset the root commit was fetched as.
        let root_changeset_id = state
            .commits
            .iter()
            .find(|(_, commit)| *commit == root_commit)
            .map(|(id, _)| *id);
        state.remotes.insert(
            id.clone(),
            RemoteState {
                path: path.clone(),
                max_changeset_id: root_changeset_id,
            },
        );

        Ok(FakeRemote {
            id,
            path: path.clone(),
            state: Rc::clone(&self.state),
        })
    }

    fn delete_remote(&self, remote: &FakeRemote) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.remotes.remove(&remote.id);
        state.deleted_remote_ids.push(remote.id.clone());
        Ok(())
    }
}
