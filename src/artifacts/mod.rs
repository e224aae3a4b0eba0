//! Branch-topology data structures and algorithms
//!
//! - `branch`: TFVC paths, creation/rename chain links, branch-tree discovery
//! - `changeset`: changeset identities, change-type flags, merge-tracking records
//! - `fetch`: the all-branches convergence worklist and its reports
//! - `objects`: git-side object identifiers
//! - `root_changeset`: root-changeset classification, resolution, and chain building

pub mod branch;
pub mod changeset;
pub mod fetch;
pub mod objects;
pub mod root_changeset;
