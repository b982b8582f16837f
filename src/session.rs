//! Scoped ownership of a catalog backed by a file.
//!
//! Opening a session loads the store; closing it writes the catalog back.
//! A session that goes out of scope without `close` (an early `?`, a panic
//! unwinding through the event loop) still saves on drop, so every exit path
//! persists the catalog.

use std::path::{Path, PathBuf};

use log::{error, info};

use crate::catalog::Catalog;
use crate::store::{self, StoreResult};

pub struct CatalogSession {
    path: PathBuf,
    catalog: Catalog,
    fresh: bool,
    closed: bool,
}

impl CatalogSession {
    /// Load the catalog stored at `path`. A missing file opens an empty
    /// catalog; a corrupt one is an error and nothing will be written back.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let loaded = store::load_existing(&path)?;
        let fresh = loaded.is_none();
        let catalog = Catalog::from_records(loaded.unwrap_or_default());
        info!(
            "event=session_open path={} records={} next_id={} fresh={}",
            path.display(),
            catalog.len(),
            catalog.next_id(),
            fresh
        );
        Ok(Self {
            path,
            catalog,
            fresh,
            closed: false,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `true` when no file existed at [`path`](Self::path) at open time.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Write the current state without ending the session.
    pub fn save(&self) -> StoreResult<()> {
        store::save(&self.path, self.catalog.records())
    }

    /// Save and end the session. The catalog is gone afterwards whether or
    /// not the write succeeded.
    pub fn close(mut self) -> StoreResult<()> {
        self.closed = true;
        let result = self.save();
        info!(
            "event=session_close path={} status={}",
            self.path.display(),
            if result.is_ok() { "ok" } else { "error" }
        );
        result
    }
}

impl Drop for CatalogSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.save() {
            error!(
                "event=session_drop_save status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }
}
