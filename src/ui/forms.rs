use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Book;

/// Input state for the "add book" dialog.
#[derive(Default, Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Fields of the book form, in tab order.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum BookField {
    #[default]
    Title,
    Author,
    Year,
}

impl BookField {
    /// Row offset of the field inside the dialog.
    pub(crate) fn row(self) -> u16 {
        match self {
            BookField::Title => 0,
            BookField::Author => 1,
            BookField::Year => 2,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            BookField::Title => "Title",
            BookField::Author => "Author",
            BookField::Year => "Year",
        }
    }
}

impl BookForm {
    /// Move focus forward, wrapping back to the title.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Title,
        };
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Year,
            BookField::Author => BookField::Title,
            BookField::Year => BookField::Author,
        };
    }

    /// Append a character to the active field. The year only takes digits
    /// and a leading minus sign.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Year => {
                if ch.is_ascii_digit() || (ch == '-' && self.year.is_empty()) {
                    self.year.push(ch);
                    true
                } else {
                    false
                }
            }
            field => {
                if ch.is_control() {
                    return false;
                }
                self.value_mut(field).push(ch);
                true
            }
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Parse the year and hand back title and author exactly as typed.
    /// Empty text fields are accepted; only the year has to be a number.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, i32)> {
        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| anyhow!("Year must be a whole number."))?;
        Ok((self.title.clone(), self.author.clone(), year))
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: BookField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let display = match (value.is_empty(), field) {
            (false, _) => value.to_string(),
            (true, BookField::Year) => "<required>".to_string(),
            (true, _) => "<empty>".to_string(),
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        self.value(field).chars().count()
    }

    fn value(&self, field: BookField) -> &str {
        match field {
            BookField::Title => &self.title,
            BookField::Author => &self.author,
            BookField::Year => &self.year,
        }
    }

    fn value_mut(&mut self, field: BookField) -> &mut String {
        match field {
            BookField::Title => &mut self.title,
            BookField::Author => &mut self.author,
            BookField::Year => &mut self.year,
        }
    }
}

/// Catalog action waiting for a book id.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum IdAction {
    Remove,
    Borrow,
    Return,
}

impl IdAction {
    pub(crate) fn title(self) -> &'static str {
        match self {
            IdAction::Remove => "Remove Book",
            IdAction::Borrow => "Borrow Book",
            IdAction::Return => "Return Book",
        }
    }
}

/// Single-field prompt asking which book an action applies to.
#[derive(Clone)]
pub(crate) struct IdPrompt {
    pub(crate) action: IdAction,
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl IdPrompt {
    /// Start the prompt prefilled with the highlighted book, if any.
    pub(crate) fn new(action: IdAction, selected: Option<&Book>) -> Self {
        Self {
            action,
            input: selected.map(|book| book.id.to_string()).unwrap_or_default(),
            error: None,
        }
    }

    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() || (ch == '-' && self.input.is_empty()) {
            self.input.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    pub(crate) fn parse_id(&self) -> Result<i64> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return Err(anyhow!("Book id is required."));
        }
        raw.parse::<i64>()
            .map_err(|_| anyhow!("Book id must be a whole number."))
    }
}

/// Confirmation dialog state for removing a book.
#[derive(Clone)]
pub(crate) struct ConfirmRemove {
    pub(crate) id: i64,
    pub(crate) label: String,
}

impl ConfirmRemove {
    pub(crate) fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            label: book.display_title(),
        }
    }
}

/// Text typed into the title search bar.
#[derive(Default, Clone)]
pub(crate) struct SearchState {
    pub(crate) query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_field_rejects_letters() {
        let mut form = BookForm {
            active: BookField::Year,
            ..BookForm::default()
        };
        assert!(form.push_char('-'));
        assert!(!form.push_char('-'));
        assert!(!form.push_char('x'));
        assert!(form.push_char('4'));
        assert_eq!(form.year, "-4");
    }

    #[test]
    fn parse_inputs_keeps_text_verbatim_and_requires_a_year() {
        let mut form = BookForm {
            title: "  Dune ".into(),
            author: "Herbert".into(),
            year: String::new(),
            ..BookForm::default()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Year must be a whole number.");

        form.year = "1965".into();
        assert_eq!(
            form.parse_inputs().unwrap(),
            ("  Dune ".to_string(), "Herbert".to_string(), 1965)
        );
    }

    #[test]
    fn empty_title_and_author_are_accepted() {
        let form = BookForm {
            year: " 1700 ".into(),
            ..BookForm::default()
        };
        assert_eq!(
            form.parse_inputs().unwrap(),
            (String::new(), String::new(), 1700)
        );
    }

    #[test]
    fn empty_text_fields_show_a_placeholder() {
        let form = BookForm::default();
        let text = |field| {
            form.build_line(field)
                .spans
                .iter()
                .map(|span| span.content.to_string())
                .collect::<String>()
        };
        assert_eq!(text(BookField::Author), "Author: <empty>");
        assert_eq!(text(BookField::Year), "Year: <required>");
    }

    #[test]
    fn year_out_of_range_is_rejected() {
        let form = BookForm {
            title: "Dune".into(),
            author: "Herbert".into(),
            year: "99999999999".into(),
            ..BookForm::default()
        };
        let err = form.parse_inputs().unwrap_err();
        assert_eq!(err.to_string(), "Year must be a whole number.");
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = BookForm::default();
        form.previous_field();
        assert!(form.active == BookField::Year);
        form.next_field();
        assert!(form.active == BookField::Title);
    }

    #[test]
    fn id_prompt_prefills_selected_book() {
        let book = Book::new(12, "Emma", "Austen", 1815);
        let prompt = IdPrompt::new(IdAction::Borrow, Some(&book));
        assert_eq!(prompt.input, "12");
        assert_eq!(prompt.parse_id().unwrap(), 12);

        let empty = IdPrompt::new(IdAction::Return, None);
        assert!(empty.parse_id().is_err());
    }
}
