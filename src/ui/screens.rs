use std::cmp::min;

use crate::catalog::Catalog;
use crate::models::Book;

/// Which slice of the catalog a list screen shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    All,
    /// Exact title matches for the stored query.
    Title(String),
    Available,
}

/// Snapshot of the books currently on screen plus the highlighted row.
pub(crate) struct BookListScreen {
    pub(crate) kind: ListKind,
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl BookListScreen {
    pub(crate) fn new(kind: ListKind, catalog: &Catalog) -> Self {
        let mut screen = Self {
            kind,
            books: Vec::new(),
            selected: 0,
        };
        screen.refresh(catalog);
        screen
    }

    /// Re-query the catalog after a mutation, keeping the selection in range.
    pub(crate) fn refresh(&mut self, catalog: &Catalog) {
        let books: Vec<&Book> = match &self.kind {
            ListKind::All => catalog.records().iter().collect(),
            ListKind::Title(query) => catalog.find_by_title(query),
            ListKind::Available => catalog.list_available(),
        };
        self.books = books.into_iter().cloned().collect();
        self.ensure_in_bounds();
    }

    /// Highlight the row showing `id` if it is on screen.
    pub(crate) fn focus(&mut self, id: i64) {
        if let Some(idx) = self.books.iter().position(|book| book.id == id) {
            self.selected = idx;
        }
    }

    pub(crate) fn title(&self) -> String {
        match &self.kind {
            ListKind::All => format!("All Books ({})", self.books.len()),
            ListKind::Title(query) => format!("Title \"{query}\" ({})", self.books.len()),
            ListKind::Available => format!("Available Books ({})", self.books.len()),
        }
    }

    pub(crate) fn current_book(&self) -> Option<&Book> {
        self.books.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            self.selected = 0;
            return;
        }
        let max_index = self.books.len() as isize - 1;
        let next = (self.selected as isize + offset).clamp(0, max_index);
        self.selected = next as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.books.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        self.selected = min(self.selected, self.books.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("Dune", "Herbert", 1965);
        catalog.add("Emma", "Austen", 1815);
        catalog.add("Dune", "Frank Herbert", 1965);
        catalog
    }

    #[test]
    fn title_screen_shows_exact_matches() {
        let catalog = sample_catalog();
        let screen = BookListScreen::new(ListKind::Title("Dune".into()), &catalog);
        let ids: Vec<i64> = screen.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(screen.title(), "Title \"Dune\" (2)");
    }

    #[test]
    fn refresh_clamps_selection_after_books_disappear() {
        let mut catalog = sample_catalog();
        let mut screen = BookListScreen::new(ListKind::Available, &catalog);
        screen.select_last();
        assert_eq!(screen.selected, 2);

        catalog.borrow(3);
        screen.refresh(&catalog);
        assert_eq!(screen.books.len(), 2);
        assert_eq!(screen.selected, 1);
    }

    #[test]
    fn move_selection_stays_in_bounds() {
        let catalog = sample_catalog();
        let mut screen = BookListScreen::new(ListKind::All, &catalog);
        screen.move_selection(-5);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);
        screen.focus(2);
        assert_eq!(screen.current_book().map(|b| b.id), Some(2));
    }
}
