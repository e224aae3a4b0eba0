//! Root-changeset classification over merge-tracking records
//!
//! The server describes a branch's origin as a pile of merge-tracking records
//! whose source/target fields mean different things depending on the source
//! item's change type. Picking the record that actually identifies the
//! creation point, and reading the right side of it, is the heart of root
//! detection.

use crate::artifacts::branch::tfs_path::TfsPath;
use crate::artifacts::changeset::{ChangeType, ChangesetSummary, ExtendedMerge};
use crate::error::{Error, Result};

/// Change types that mark a record as the branch's creation point in its
/// parent: the relevant changeset is the record's source side.
pub const CREATION_CHANGE_TYPES: ChangeType = ChangeType::ADD
    .union(ChangeType::BRANCH)
    .union(ChangeType::MERGE)
    .union(ChangeType::ROLLBACK);

/// Change types that mark a record as a branch rename: the relevant changeset
/// is the record's target side, and the chain continues at the renamed-from
/// path.
pub const RENAME_CHANGE_TYPES: ChangeType =
    ChangeType::RENAME.union(ChangeType::SOURCE_RENAME);

/// The classifier's verdict for one branch/parent pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevantChangeset {
    pub changeset: ChangesetSummary,
    /// Set when the chosen record is a rename: the branch path this one was
    /// renamed from, where the chain walk continues.
    pub renamed_from: Option<TfsPath>,
}

/// Picks the one merge-tracking record that identifies the root changeset of
/// `branch_to_create` in `parent_branch` and reads the relevant side of it.
///
/// Ties are broken by the *last* match in the supplied order: the records are
/// sorted by ascending source changeset, so the most recent revision wins.
pub fn relevant_changeset(
    merges: &[ExtendedMerge],
    parent_branch: &TfsPath,
    branch_to_create: &TfsPath,
) -> Result<RelevantChangeset> {
    // Preferred signal: the parent was genuinely the merge source, not a
    // no-op self-reference. Fall back to a rename record when the branch was
    // itself renamed and no direct parent-merge signal exists.
    let merge = merges
        .iter()
        .rev()
        .find(|m| m.source_item == *parent_branch && m.target_item != *parent_branch)
        .or_else(|| {
            merges
                .iter()
                .rev()
                .find(|m| m.source_change_type.intersects(RENAME_CHANGE_TYPES))
        })
        .ok_or_else(|| Error::AmbiguousHistory {
            branch: branch_to_create.to_string(),
            parent: parent_branch.to_string(),
        })?;

    tracing::debug!(
        changeset_id = merge.source_changeset.changeset_id,
        change_type = %merge.source_change_type,
        source_item = %merge.source_item,
        target_item = %merge.target_item,
        "classifying merge record"
    );

    let renamed_from = merge
        .source_change_type
        .intersects(RENAME_CHANGE_TYPES)
        .then(|| merge.target_item.clone());

    if merge.source_change_type.intersects(CREATION_CHANGE_TYPES) {
        tracing::debug!(
            "found C{} on branch {}",
            merge.source_changeset.changeset_id,
            merge.source_item
        );
        return Ok(RelevantChangeset {
            changeset: merge.source_changeset.clone(),
            renamed_from,
        });
    }

    if merge.source_change_type.intersects(RENAME_CHANGE_TYPES) {
        tracing::debug!(
            "found C{} on branch {}",
            merge.target_changeset.changeset_id,
            merge.target_item
        );
        return Ok(RelevantChangeset {
            changeset: merge.target_changeset.clone(),
            renamed_from,
        });
    }

    Err(Error::UnsupportedChangeType {
        change_type: merge.source_change_type,
    })
}
