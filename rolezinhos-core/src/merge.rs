//! Baseline + override reconciliation.

use std::collections::BTreeSet;

use crate::event::Role;
use crate::id::RecordId;

/// Merge local overrides into a baseline sequence.
///
/// An override whose id matches an existing entry replaces that entry where
/// it stands; any other override is appended, in override order. Whole
/// records are replaced, fields are never merged.
pub fn unify(baseline: Vec<Role>, overrides: &[Role]) -> Vec<Role> {
    let mut unified = baseline;

    for record in overrides {
        match unified.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => unified.push(record.clone()),
        }
    }

    unified
}

/// Drop every record whose id has been deleted locally.
pub fn apply_tombstones(records: Vec<Role>, removed: &BTreeSet<RecordId>) -> Vec<Role> {
    if removed.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| !removed.contains(&r.id))
        .collect()
}
