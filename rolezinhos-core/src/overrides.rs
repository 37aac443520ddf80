//! Local mutation log: records created, edited or deleted on this machine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{RolezinhosError, RolezinhosResult};
use crate::event::Role;
use crate::id::RecordId;
use crate::storage::Storage;

pub const OVERRIDES_KEY: &str = "rolezinhos.overrides";

/// The persisted override document.
///
/// `removed` holds tombstones for deleted records, so a deleted baseline
/// record stays hidden when the baseline is fetched again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overrides {
    #[serde(default)]
    pub events: Vec<Role>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub removed: BTreeSet<RecordId>,
}

/// Owns the override blob in storage. Every write replaces the whole document.
pub struct OverrideLog<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> OverrideLog<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, OVERRIDES_KEY)
    }

    pub fn with_key(storage: S, key: &str) -> Self {
        OverrideLog {
            storage,
            key: key.to_string(),
        }
    }

    /// Read the override document.
    ///
    /// A document that fails to parse is discarded and treated as empty.
    pub fn load(&self) -> RolezinhosResult<Overrides> {
        let Some(content) = self.storage.get(&self.key)? else {
            return Ok(Overrides::default());
        };

        match serde_json::from_str(&content) {
            Ok(overrides) => Ok(overrides),
            Err(e) => {
                let err = RolezinhosError::CorruptLocalState {
                    key: self.key.clone(),
                    reason: e.to_string(),
                };
                tracing::warn!(error = %err, "discarding local overrides");
                self.storage.remove(&self.key)?;
                Ok(Overrides::default())
            }
        }
    }

    /// Insert or replace a record by id and persist before returning.
    pub fn upsert(&self, record: &Role) -> RolezinhosResult<()> {
        if record.id.is_empty() {
            return Err(RolezinhosError::MissingId);
        }

        let mut overrides = self.load()?;
        match overrides.events.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => overrides.events.push(record.clone()),
        }
        overrides.removed.remove(&record.id);

        self.save(&overrides)
    }

    /// Delete a record, whether it was created locally or came from the baseline.
    pub fn remove(&self, id: &RecordId) -> RolezinhosResult<()> {
        let mut overrides = self.load()?;
        overrides.events.retain(|r| &r.id != id);
        overrides.removed.insert(id.clone());

        self.save(&overrides)
    }

    /// Write `records` as the initial override collection, unless an
    /// override document was already stored. Returns whether anything was written.
    pub fn seed_if_empty(&self, records: &[Role]) -> RolezinhosResult<bool> {
        if self.storage.get(&self.key)?.is_some() {
            return Ok(false);
        }

        let overrides = Overrides {
            events: records.iter().filter(|r| !r.id.is_empty()).cloned().collect(),
            removed: BTreeSet::new(),
        };
        self.save(&overrides)?;
        Ok(true)
    }

    fn save(&self, overrides: &Overrides) -> RolezinhosResult<()> {
        let content = serde_json::to_string(overrides)?;
        self.storage.set(&self.key, &content)
    }
}
