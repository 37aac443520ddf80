//! Query facade over the unified event listing.
//!
//! Every read re-merges the baseline snapshot with the current override
//! log, so a write is visible to the very next query.

use crate::baseline::Baseline;
use crate::error::RolezinhosResult;
use crate::event::{Category, Role, UNCATEGORIZED};
use crate::favorites::FavoritesSet;
use crate::id::{RecordId, new_id};
use crate::merge::{apply_tombstones, unify};
use crate::overrides::OverrideLog;
use crate::session::Session;
use crate::storage::Storage;

/// Result of a favorites query.
///
/// `NoneYet` means the user has not favorited anything, which the UI shows
/// differently from favorites that no longer match any record.
#[derive(Debug, Clone, PartialEq)]
pub enum Favorites {
    NoneYet,
    Found(Vec<Role>),
}

impl Favorites {
    pub fn records(&self) -> &[Role] {
        match self {
            Favorites::NoneYet => &[],
            Favorites::Found(records) => records,
        }
    }
}

pub struct Catalog<S: Storage + Clone> {
    baseline: Baseline,
    overrides: OverrideLog<S>,
    favorites: FavoritesSet<S>,
}

impl<S: Storage + Clone> Catalog<S> {
    pub fn new(baseline: Baseline, storage: S) -> Self {
        Catalog {
            baseline,
            overrides: OverrideLog::new(storage.clone()),
            favorites: FavoritesSet::new(storage),
        }
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    // READS:

    /// The unified listing: baseline order with local edits in place,
    /// then locally created records, minus local deletions.
    pub fn all(&self) -> RolezinhosResult<Vec<Role>> {
        let overrides = self.overrides.load()?;
        let unified = unify(self.baseline.events.clone(), &overrides.events);
        Ok(apply_tombstones(unified, &overrides.removed))
    }

    pub fn by_id(&self, id: &RecordId) -> RolezinhosResult<Option<Role>> {
        Ok(self.all()?.into_iter().find(|r| &r.id == id))
    }

    /// Records whose main category is `category_id`. An unknown category
    /// yields an empty list.
    pub fn by_category(&self, category_id: &RecordId) -> RolezinhosResult<Vec<Role>> {
        self.browse(Some(category_id), None)
    }

    /// Case-insensitive search on name and description. A blank term lists everything.
    pub fn search(&self, term: Option<&str>) -> RolezinhosResult<Vec<Role>> {
        self.browse(None, term)
    }

    /// Search narrowed to a category. Either filter may be absent.
    pub fn browse(
        &self,
        category_id: Option<&RecordId>,
        term: Option<&str>,
    ) -> RolezinhosResult<Vec<Role>> {
        let term = term.map(str::trim).filter(|t| !t.is_empty());
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| category_id.is_none_or(|c| r.category_id.as_ref() == Some(c)))
            .filter(|r| term.is_none_or(|t| r.matches(t)))
            .collect())
    }

    /// Favorited records in listing order.
    pub fn favorited(&self) -> RolezinhosResult<Favorites> {
        let ids = self.favorites.list()?;
        if ids.is_empty() {
            return Ok(Favorites::NoneYet);
        }

        let records = self
            .all()?
            .into_iter()
            .filter(|r| ids.contains(&r.id))
            .collect();
        Ok(Favorites::Found(records))
    }

    /// The first `limit` featured records in listing order.
    pub fn featured(&self, limit: usize) -> RolezinhosResult<Vec<Role>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.featured)
            .take(limit)
            .collect())
    }

    pub fn categories(&self) -> &[Category] {
        &self.baseline.categories
    }

    pub fn category(&self, id: &RecordId) -> Option<&Category> {
        self.baseline.categories.iter().find(|c| &c.id == id)
    }

    /// Display name for a category reference, "Geral" when unresolved.
    pub fn category_name(&self, id: Option<&RecordId>) -> &str {
        id.and_then(|id| self.category(id))
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }

    // FAVORITES:

    pub fn is_favorite(&self, id: &RecordId) -> RolezinhosResult<bool> {
        self.favorites.is_favorite(id)
    }

    /// Favorited ids in the order they were added.
    pub fn favorite_ids(&self) -> RolezinhosResult<Vec<RecordId>> {
        self.favorites.list()
    }

    pub fn toggle_favorite(&self, id: &RecordId) -> RolezinhosResult<bool> {
        self.favorites.toggle(id)
    }

    // WRITES:

    /// Store a new record under a fresh id, owned by the session user.
    pub fn create(&self, session: &Session, mut role: Role) -> RolezinhosResult<Role> {
        let user = session.require_user("create events")?;

        role.id = new_id();
        role.creator = Some(user.to_string());
        self.overrides.upsert(&role)?;

        tracing::debug!(id = %role.id, "created");
        Ok(role)
    }

    /// Replace an existing record. Returns `None` if no record has that id.
    ///
    /// The creator is carried over from the stored record.
    pub fn update(&self, session: &Session, mut role: Role) -> RolezinhosResult<Option<Role>> {
        session.require_user("edit events")?;

        let Some(existing) = self.by_id(&role.id)? else {
            return Ok(None);
        };
        session.ensure_can_modify(&existing, "edit events")?;

        role.creator = existing.creator;
        self.overrides.upsert(&role)?;

        tracing::debug!(id = %role.id, "updated");
        Ok(Some(role))
    }

    /// Delete a record. Returns false if no record has that id.
    pub fn delete(&self, session: &Session, id: &RecordId) -> RolezinhosResult<bool> {
        session.require_user("delete events")?;

        let Some(existing) = self.by_id(id)? else {
            return Ok(false);
        };
        session.ensure_can_modify(&existing, "delete events")?;

        self.overrides.remove(id)?;

        tracing::debug!(%id, "deleted");
        Ok(true)
    }

    /// Copy the baseline events into local storage if nothing is stored yet.
    pub fn seed_if_empty(&self) -> RolezinhosResult<bool> {
        self.overrides.seed_if_empty(&self.baseline.events)
    }
}
