//! Mirror TFVC branch topology into native git history.
//!
//! The crate resolves where a TFS branch's own history begins (walking
//! rename chains back to the true creation point), binds branches to remotes
//! in a git repository, and converges an all-branches initialization over
//! repeated passes. Server and git-side implementations plug in through the
//! [`interop`] traits; [`areas::bridge::Bridge`] ties them together and hosts
//! the operations in [`commands`].

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod error;
pub mod interop;
