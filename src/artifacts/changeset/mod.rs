use crate::artifacts::branch::tfs_path::TfsPath;
use bitflags::bitflags;
use derive_new::new;
use std::fmt;

bitflags! {
    /// TFVC change kinds, using the server's wire bit values. A single change
    /// carries a set of these (e.g. `BRANCH | MERGE | EDIT`).
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeType: u16 {
        const NONE = 1;
        const ADD = 2;
        const EDIT = 4;
        const ENCODING = 8;
        const RENAME = 16;
        const DELETE = 32;
        const UNDELETE = 64;
        const BRANCH = 128;
        const MERGE = 256;
        const LOCK = 512;
        const ROLLBACK = 1024;
        const SOURCE_RENAME = 2048;
    }
}

impl ChangeType {
    const NAMED: [(ChangeType, &'static str); 12] = [
        (ChangeType::NONE, "None"),
        (ChangeType::ADD, "Add"),
        (ChangeType::EDIT, "Edit"),
        (ChangeType::ENCODING, "Encoding"),
        (ChangeType::RENAME, "Rename"),
        (ChangeType::DELETE, "Delete"),
        (ChangeType::UNDELETE, "Undelete"),
        (ChangeType::BRANCH, "Branch"),
        (ChangeType::MERGE, "Merge"),
        (ChangeType::LOCK, "Lock"),
        (ChangeType::ROLLBACK, "Rollback"),
        (ChangeType::SOURCE_RENAME, "SourceRename"),
    ];
}

impl fmt::Debug for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect::<Vec<_>>();
        if names.is_empty() {
            write!(f, "(empty)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The minimal identity of a server-side revision: its number and the branch
/// it belongs to.
#[derive(new, Debug, Clone, PartialEq, Eq)]
pub struct ChangesetSummary {
    pub changeset_id: i64,
    pub branch_path: TfsPath,
}

/// One merge-tracking record between two branches, as reported by the server.
///
/// The source/target fields carry different semantics depending on the source
/// item's change type: for a branch/merge creation the source side points into
/// the parent branch, while for a rename the target side identifies the
/// renamed-from item at the rename revision.
#[derive(new, Debug, Clone)]
pub struct ExtendedMerge {
    pub source_changeset: ChangesetSummary,
    pub source_item: TfsPath,
    pub source_change_type: ChangeType,
    pub target_changeset: ChangesetSummary,
    pub target_item: TfsPath,
}
