//! Local record store for the Mapa dos Rolezinhos event listing.
//!
//! This crate merges the published event data (the baseline) with edits
//! made locally and exposes the result through a query facade:
//! - `baseline` fetches the read-only dataset, degrading to empty on failure
//! - `overrides` persists local creates, edits and deletes
//! - `favorites` persists the user's favorited ids
//! - `catalog` answers listing queries against the merged view

pub mod baseline;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod favorites;
pub mod id;
pub mod merge;
pub mod overrides;
pub mod session;
pub mod storage;

pub use baseline::{Baseline, BaselineSource};
pub use catalog::{Catalog, Favorites};
pub use error::{RolezinhosError, RolezinhosResult};
pub use event::{Category, Photo, Role};
pub use id::{RecordId, new_id};
pub use session::Session;
