//! Collaborator boundaries of the bridge
//!
//! The core never talks to a real TFS server or a real git object store; it is
//! written against these traits. Production implementations live with the
//! connection and storage layers, test implementations are scripted fakes.

pub mod git;
pub mod tfs;

pub use git::{DEFAULT_REMOTE_ID, FetchSummary, GitRepository, TfsRemote};
pub use tfs::{BranchObject, TfsServer};
