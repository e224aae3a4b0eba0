use crate::error::Result;
use crate::interop::{DEFAULT_REMOTE_ID, GitRepository, TfsServer};
use std::cell::{RefCell, RefMut};

/// High-level coordinator between one TFS server and one git repository.
///
/// Progress lines go to the injected writer; structured outcomes are returned
/// to the caller, which owns presentation. The bridge assumes single-writer
/// access to the git repository: no other run may mutate it concurrently.
pub struct Bridge<T: TfsServer, G: GitRepository> {
    tfs: T,
    repository: G,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl<T: TfsServer, G: GitRepository> Bridge<T, G> {
    pub fn new(tfs: T, repository: G, writer: Box<dyn std::io::Write>) -> Self {
        Self {
            tfs,
            repository,
            writer: RefCell::new(writer),
        }
    }

    pub fn tfs(&self) -> &T {
        &self.tfs
    }

    pub fn repository(&self) -> &G {
        &self.repository
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    /// The trunk binding created by the initial clone. Every initialization
    /// starts from it; without one there is nothing to attach branches to.
    pub(crate) fn default_remote(&self) -> Result<G::Remote> {
        self.repository
            .remote(DEFAULT_REMOTE_ID)?
            .ok_or_else(|| {
                anyhow::anyhow!("no TFVC clone found in this repository; clone the trunk first")
                    .into()
            })
    }
}
