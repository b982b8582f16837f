//! Domain model shared by the store, the catalog and the terminal front-end.
//! `Book` stays a light-weight data holder: the catalog decides ids and
//! availability, the store decides how a book looks on disk.

use std::fmt;

/// Largest id accepted from a catalog file. Ids above it are left for `add`,
/// so a session can keep allocating fresh ids after loading any valid file.
pub const MAX_LOADED_ID: i64 = i64::MAX / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One catalog entry. Only `available` changes after creation, and only
/// through the catalog's borrow/return operations.
pub struct Book {
    /// Catalog-assigned identifier. Unique among live records and never
    /// reused within a session.
    pub id: i64,
    /// Title shown in lists and matched exactly by title searches.
    pub title: String,
    pub author: String,
    /// Publication year.
    pub year: i32,
    /// `false` while the book is lent out.
    pub available: bool,
}

impl Book {
    /// Build a freshly added book, which always starts out available.
    pub fn new(id: i64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            available: true,
        }
    }

    /// Short label used in status messages.
    pub fn display_title(&self) -> String {
        if self.author.trim().is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.author)
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, {}){}",
            self.id,
            self.title,
            self.author,
            self.year,
            if self.available { "" } else { " [borrowed]" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Book;

    #[test]
    fn new_books_start_available() {
        let book = Book::new(1, "Dune", "Herbert", 1965);
        assert!(book.available);
        assert_eq!(book.display_title(), "Dune - Herbert");
    }

    #[test]
    fn display_marks_borrowed_books() {
        let mut book = Book::new(7, "Solaris", "Lem", 1961);
        assert_eq!(book.to_string(), "#7 Solaris (Lem, 1961)");
        book.available = false;
        assert_eq!(book.to_string(), "#7 Solaris (Lem, 1961) [borrowed]");
    }

    #[test]
    fn display_title_omits_blank_author() {
        let book = Book::new(2, "Anonymous Verse", "  ", 1700);
        assert_eq!(book.display_title(), "Anonymous Verse");
    }
}
