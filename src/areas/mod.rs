//! Composition root of the bridge
//!
//! - `bridge`: ties the TFS server and git repository collaborators together
//!   and hosts the user-facing operations

pub mod bridge;
