//! In-memory catalog: the ordered list of books for the session plus the id
//! allocator. Every operation is a linear scan; the catalog is small and the
//! order of insertion is part of what callers see.

use log::{debug, warn};
use thiserror::Error;

use crate::models::{Book, MAX_LOADED_ID};

/// Errors raised by catalog mutations that target a specific id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Book {0} not found.")]
    NotFound(i64),
}

/// Result of a borrow or return request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendOutcome {
    /// The availability flag was flipped.
    Updated,
    /// No book carries the requested id.
    NotFound,
    /// The book exists but is already borrowed (for borrow) or already
    /// available (for return).
    AlreadyInState,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<Book>,
    next_id: i64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the catalog with records read from the store. Ids are kept
    /// verbatim and `next_id` moves past the largest one. A row repeating an
    /// id already seen, or carrying an id above [`MAX_LOADED_ID`], is dropped
    /// so ids stay unique.
    pub fn from_records(records: impl IntoIterator<Item = Book>) -> Self {
        let mut catalog = Self::new();
        for book in records {
            let successor = match book.id.checked_add(1) {
                Some(next) if book.id <= MAX_LOADED_ID => next,
                _ => {
                    warn!("event=catalog_seed_id_out_of_range id={}", book.id);
                    continue;
                }
            };
            if catalog.get(book.id).is_some() {
                warn!("event=catalog_seed_duplicate id={}", book.id);
                continue;
            }
            catalog.next_id = catalog.next_id.max(successor);
            catalog.records.push(book);
        }
        catalog
    }

    /// Append a new, available book and return its id.
    pub fn add(&mut self, title: impl Into<String>, author: impl Into<String>, year: i32) -> i64 {
        // next_id starts at most one past MAX_LOADED_ID, far from overflow.
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(Book::new(id, title, author, year));
        debug!("event=catalog_add id={id}");
        id
    }

    /// Remove the book with `id`, handing it back to the caller.
    pub fn remove(&mut self, id: i64) -> Result<Book, CatalogError> {
        let idx = self
            .records
            .iter()
            .position(|book| book.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        debug!("event=catalog_remove id={id}");
        Ok(self.records.remove(idx))
    }

    /// Every book whose title equals `title` exactly (case-sensitive), in
    /// catalog order.
    pub fn find_by_title(&self, title: &str) -> Vec<&Book> {
        self.records
            .iter()
            .filter(|book| book.title == title)
            .collect()
    }

    /// Books that are not currently lent out, in catalog order.
    pub fn list_available(&self) -> Vec<&Book> {
        self.records.iter().filter(|book| book.available).collect()
    }

    /// Mark an available book as lent out.
    pub fn borrow(&mut self, id: i64) -> LendOutcome {
        self.set_available(id, false)
    }

    /// Mark a lent-out book as available again.
    pub fn return_book(&mut self, id: i64) -> LendOutcome {
        self.set_available(id, true)
    }

    fn set_available(&mut self, id: i64, available: bool) -> LendOutcome {
        let outcome = match self.records.iter_mut().find(|book| book.id == id) {
            None => LendOutcome::NotFound,
            Some(book) if book.available == available => LendOutcome::AlreadyInState,
            Some(book) => {
                book.available = available;
                LendOutcome::Updated
            }
        };
        debug!("event=catalog_set_available id={id} available={available} outcome={outcome:?}");
        outcome
    }

    pub fn get(&self, id: i64) -> Option<&Book> {
        self.records.iter().find(|book| book.id == id)
    }

    /// All books in catalog order.
    pub fn records(&self) -> &[Book] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> i64 {
        self.next_id
    }
}
