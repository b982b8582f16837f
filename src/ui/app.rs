use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::{info, warn};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::{Catalog, LendOutcome};
use crate::session::CatalogSession;

use super::forms::{BookField, BookForm, ConfirmRemove, IdAction, IdPrompt, SearchState};
use super::helpers::{book_row_line, centered_rect, cursor_column, surface_error};
use super::screens::{BookListScreen, ListKind};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Fine-grained modes layered over the book list.
enum Mode {
    Normal,
    AddingBook(BookForm),
    PromptingId(IdPrompt),
    ConfirmRemove(ConfirmRemove),
    Searching(SearchState),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application state for the terminal front-end. The session it wraps is
/// handed back through [`App::into_session`] so the caller decides when the
/// catalog gets written.
pub struct App {
    session: CatalogSession,
    screen: BookListScreen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(session: CatalogSession) -> Self {
        let screen = BookListScreen::new(ListKind::All, session.catalog());
        let status = session.is_fresh().then(|| StatusMessage {
            text: format!(
                "No catalog at {}; starting with an empty library.",
                session.path().display()
            ),
            kind: StatusKind::Info,
        });
        Self {
            session,
            screen,
            mode: Mode::Normal,
            status,
        }
    }

    /// Give the session back once the event loop is done with it.
    pub fn into_session(self) -> CatalogSession {
        self.session
    }

    pub fn catalog(&self) -> &Catalog {
        self.session.catalog()
    }

    /// Feed one key press through the current mode. Returns `true` when the
    /// user asked to exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form)?,
            Mode::PromptingId(prompt) => self.handle_id_prompt(code, prompt)?,
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm)?,
            Mode::Searching(state) => self.handle_search(code, state)?,
        };

        Ok(exit)
    }

    /// Write the catalog to disk right away.
    pub fn handle_ctrl_s(&mut self) -> Result<()> {
        match self
            .session
            .save()
            .with_context(|| format!("failed to save {}", self.session.path().display()))
        {
            Ok(()) => {
                let count = self.catalog().len();
                self.set_status(
                    format!("Saved {count} books to {}.", self.session.path().display()),
                    StatusKind::Info,
                );
            }
            Err(err) => {
                warn!("event=manual_save status=error error={err:#}");
                self.set_status(surface_error(&err), StatusKind::Error);
            }
        }
        Ok(())
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('7') | KeyCode::Char('q') | KeyCode::Char('Q') => {
                *exit = true;
            }
            KeyCode::Esc => {
                if self.screen.kind == ListKind::All {
                    *exit = true;
                } else {
                    self.clear_status();
                    self.show_list(ListKind::All);
                }
            }
            KeyCode::Up => self.screen.move_selection(-1),
            KeyCode::Down => self.screen.move_selection(1),
            KeyCode::PageUp => self.screen.move_selection(-5),
            KeyCode::PageDown => self.screen.move_selection(5),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('1') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingBook(BookForm::default()));
            }
            KeyCode::Char('2') | KeyCode::Char('-') => {
                self.clear_status();
                return Ok(self.prompt_for_id(IdAction::Remove));
            }
            KeyCode::Char('3') | KeyCode::Char('f') | KeyCode::Char('F') => {
                self.clear_status();
                return Ok(Mode::Searching(SearchState::default()));
            }
            KeyCode::Char('4') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                self.show_list(ListKind::Available);
            }
            KeyCode::Char('5') | KeyCode::Char('b') | KeyCode::Char('B') => {
                self.clear_status();
                return Ok(self.prompt_for_id(IdAction::Borrow));
            }
            KeyCode::Char('6') | KeyCode::Char('r') | KeyCode::Char('R') => {
                self.clear_status();
                return Ok(self.prompt_for_id(IdAction::Return));
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status("Add book cancelled.", StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((title, author, year)) => {
                    self.add_book(title, author, year);
                    keep_open = false;
                }
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::AddingBook(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_id_prompt(&mut self, code: KeyCode, mut prompt: IdPrompt) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                prompt.backspace();
                Ok(Mode::PromptingId(prompt))
            }
            KeyCode::Char(ch) => {
                if prompt.push_char(ch) {
                    prompt.error = None;
                }
                Ok(Mode::PromptingId(prompt))
            }
            KeyCode::Enter => {
                let id = match prompt.parse_id() {
                    Ok(id) => id,
                    Err(err) => {
                        prompt.error = Some(surface_error(&err));
                        return Ok(Mode::PromptingId(prompt));
                    }
                };
                Ok(self.apply_id_action(prompt.action, id))
            }
            _ => Ok(Mode::PromptingId(prompt)),
        }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.session.catalog_mut().remove(confirm.id) {
                    Ok(book) => {
                        info!("event=ui_remove id={}", book.id);
                        self.refresh_screen(None);
                        self.set_status(
                            format!("Removed book {}: {}.", book.id, book.display_title()),
                            StatusKind::Info,
                        );
                    }
                    Err(err) => self.set_status(err.to_string(), StatusKind::Error),
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmRemove(confirm)),
        }
    }

    fn handle_search(&mut self, code: KeyCode, mut state: SearchState) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Search cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Backspace => {
                state.query.pop();
                Ok(Mode::Searching(state))
            }
            KeyCode::Enter => {
                self.show_list(ListKind::Title(state.query));
                Ok(Mode::Normal)
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.query.push(ch);
                Ok(Mode::Searching(state))
            }
            _ => Ok(Mode::Searching(state)),
        }
    }

    fn prompt_for_id(&self, action: IdAction) -> Mode {
        Mode::PromptingId(IdPrompt::new(action, self.screen.current_book()))
    }

    fn apply_id_action(&mut self, action: IdAction, id: i64) -> Mode {
        match action {
            IdAction::Remove => match self.catalog().get(id) {
                Some(book) => Mode::ConfirmRemove(ConfirmRemove::from(book)),
                None => {
                    self.set_status(format!("Book {id} not found."), StatusKind::Error);
                    Mode::Normal
                }
            },
            IdAction::Borrow => {
                let outcome = self.session.catalog_mut().borrow(id);
                self.report_lend(id, outcome, "Borrowed", "already borrowed");
                Mode::Normal
            }
            IdAction::Return => {
                let outcome = self.session.catalog_mut().return_book(id);
                self.report_lend(id, outcome, "Returned", "already available");
                Mode::Normal
            }
        }
    }

    fn report_lend(&mut self, id: i64, outcome: LendOutcome, done: &str, already: &str) {
        match outcome {
            LendOutcome::Updated => {
                info!("event=ui_lend id={id} action={done}");
                self.refresh_screen(Some(id));
                let label = self
                    .catalog()
                    .get(id)
                    .map(|book| book.display_title())
                    .unwrap_or_default();
                self.set_status(format!("{done} {label}."), StatusKind::Info);
            }
            LendOutcome::NotFound => {
                self.set_status(format!("Book {id} not found."), StatusKind::Error)
            }
            LendOutcome::AlreadyInState => {
                self.set_status(format!("Book {id} is {already}."), StatusKind::Error)
            }
        }
    }

    fn add_book(&mut self, title: String, author: String, year: i32) {
        let id = self.session.catalog_mut().add(title, author, year);
        info!("event=ui_add id={id}");
        self.refresh_screen(Some(id));
        let label = self
            .catalog()
            .get(id)
            .map(|book| book.display_title())
            .unwrap_or_default();
        self.set_status(format!("Added book {id}: {label}."), StatusKind::Info);
    }

    fn show_list(&mut self, kind: ListKind) {
        self.screen = BookListScreen::new(kind, self.session.catalog());
        if self.screen.kind != ListKind::All && self.screen.books.is_empty() {
            self.set_status("No books found.", StatusKind::Info);
        }
    }

    fn refresh_screen(&mut self, focus_id: Option<i64>) {
        self.screen.refresh(self.session.catalog());
        if let Some(id) = focus_id {
            self.screen.focus(id);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_book_list(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingBook(form) => self.draw_book_form(frame, area, form),
            Mode::PromptingId(prompt) => self.draw_id_prompt(frame, area, prompt),
            Mode::ConfirmRemove(confirm) => self.draw_confirm_remove(frame, area, confirm),
            Mode::Searching(state) => self.draw_search_bar(frame, area, state),
            Mode::Normal => {}
        }
    }

    fn draw_book_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.screen.title())
            .borders(Borders::ALL);

        if self.screen.books.is_empty() {
            let text = match self.screen.kind {
                ListKind::All => "No books yet. Press '1' or '+' to add one.",
                _ => "No books found.",
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .screen
            .books
            .iter()
            .map(|book| ListItem::new(book_row_line(book)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.screen.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let pairs: &[(&str, &str)] = match &self.mode {
            Mode::AddingBook(_) => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::PromptingId(_) | Mode::Searching(_) => {
                &[("[Enter]", " Confirm   "), ("[Esc]", " Cancel")]
            }
            Mode::ConfirmRemove(_) => &[("[Y]", " Remove   "), ("[N/Esc]", " Keep")],
            Mode::Normal => &[
                ("[1]", " Add  "),
                ("[2]", " Remove  "),
                ("[3]", " Find  "),
                ("[4]", " Available  "),
                ("[5]", " Borrow  "),
                ("[6]", " Return  "),
                ("[7]", " Exit  "),
                ("[^S]", " Save"),
            ],
        };

        let spans: Vec<Span<'static>> = pairs
            .iter()
            .flat_map(|(key, label)| [Span::styled(*key, key_style), Span::raw(*label)])
            .collect();
        Line::from(spans)
    }

    fn draw_book_form(&self, frame: &mut Frame, area: Rect, form: &BookForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Book").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line(BookField::Title),
            form.build_line(BookField::Author),
            form.build_line(BookField::Year),
            Line::from(""),
        ];

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let field = form.active;
        let offset = field.label().len() + 2 + form.value_len(field);
        frame.set_cursor_position((cursor_column(inner, offset), inner.y + field.row()));
    }

    fn draw_id_prompt(&self, frame: &mut Frame, area: Rect, prompt: &IdPrompt) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(prompt.action.title())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let hint = match &prompt.error {
            Some(error) => Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "Enter to confirm • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        };
        let lines = vec![
            Line::from(format!("Book id: {}", prompt.input)),
            Line::from(""),
            hint,
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let offset = "Book id: ".len() + prompt.input.chars().count();
        frame.set_cursor_position((cursor_column(inner, offset), inner.y));
    }

    fn draw_confirm_remove(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmRemove) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Remove book {} ({})?", confirm.id, confirm.label)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect, state: &SearchState) {
        let height = 3u16.min(area.height);
        let popup_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height,
        };
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Find by exact title");
        let paragraph = Paragraph::new(Span::raw(format!("Title: {}", state.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let offset = "Title: ".len() + state.query.chars().count();
        frame.set_cursor_position((cursor_column(inner, offset), inner.y));
    }

    #[cfg(test)]
    fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn app_in(dir: &tempfile::TempDir) -> App {
        let session = CatalogSession::open(dir.path().join("library.csv")).unwrap();
        App::new(session)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
    }

    fn add_via_form(app: &mut App, title: &str, author: &str, year: &str) {
        app.handle_key(KeyCode::Char('1')).unwrap();
        type_text(app, title);
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, author);
        app.handle_key(KeyCode::Tab).unwrap();
        type_text(app, year);
        app.handle_key(KeyCode::Enter).unwrap();
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn add_form_creates_a_book() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        add_via_form(&mut app, "Dune", "Herbert", "1965");

        let book = app.catalog().get(1).unwrap();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.year, 1965);
        assert_eq!(app.status_text(), Some("Added book 1: Dune - Herbert."));
        assert!(matches!(app.mode, Mode::Normal));
    }

    #[test]
    fn add_form_accepts_an_empty_author() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        add_via_form(&mut app, "Anon", "", "1700");

        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.status_text(), Some("Added book 1: Anon."));
        let book = app.catalog().get(1).unwrap();
        assert_eq!(book.author, "");
        assert_eq!(book.year, 1700);
    }

    #[test]
    fn add_form_keeps_dialog_open_without_a_year() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);

        app.handle_key(KeyCode::Char('+')).unwrap();
        type_text(&mut app, "Dune");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(app.catalog().is_empty());
        assert_eq!(app.status_text(), Some("Year must be a whole number."));
        assert!(matches!(app.mode, Mode::AddingBook(_)));
    }

    #[test]
    fn fresh_catalog_is_announced_in_the_footer() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);
        assert!(app
            .status_text()
            .unwrap()
            .starts_with("No catalog at "));
        app.into_session().close().unwrap();

        let reopened = app_in(&dir);
        assert_eq!(reopened.status_text(), None);
        assert!(rendered(&reopened).contains("No books yet"));
    }

    #[test]
    fn cursor_stays_inside_dialogs_for_long_input() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.handle_key(KeyCode::Char('+')).unwrap();
        type_text(&mut app, &"x".repeat(500));

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 40);
    }

    #[test]
    fn borrow_prompt_reports_each_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        add_via_form(&mut app, "Dune", "Herbert", "1965");

        app.handle_key(KeyCode::Char('5')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(!app.catalog().get(1).unwrap().available);
        assert_eq!(app.status_text(), Some("Borrowed Dune - Herbert."));

        app.handle_key(KeyCode::Char('b')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.status_text(), Some("Book 1 is already borrowed."));

        app.handle_key(KeyCode::Char('b')).unwrap();
        app.handle_key(KeyCode::Backspace).unwrap();
        type_text(&mut app, "9");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.status_text(), Some("Book 9 not found."));

        app.handle_key(KeyCode::Char('6')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.catalog().get(1).unwrap().available);
        assert_eq!(app.status_text(), Some("Returned Dune - Herbert."));
    }

    #[test]
    fn removal_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        add_via_form(&mut app, "Dune", "Herbert", "1965");

        app.handle_key(KeyCode::Char('2')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(matches!(app.mode, Mode::ConfirmRemove(_)));
        app.handle_key(KeyCode::Char('n')).unwrap();
        assert_eq!(app.catalog().len(), 1);

        app.handle_key(KeyCode::Char('-')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Char('y')).unwrap();
        assert!(app.catalog().is_empty());
        assert_eq!(app.status_text(), Some("Removed book 1: Dune - Herbert."));

        app.handle_key(KeyCode::Char('2')).unwrap();
        type_text(&mut app, "1");
        app.handle_key(KeyCode::Enter).unwrap();
        assert_eq!(app.status_text(), Some("Book 1 not found."));
    }

    #[test]
    fn find_and_available_views_filter_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        add_via_form(&mut app, "Dune", "Herbert", "1965");
        add_via_form(&mut app, "Emma", "Austen", "1815");
        add_via_form(&mut app, "Dune", "Frank Herbert", "1965");

        app.handle_key(KeyCode::Char('3')).unwrap();
        type_text(&mut app, "Dune");
        app.handle_key(KeyCode::Enter).unwrap();
        let ids: Vec<i64> = app.screen.books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 3]);

        app.handle_key(KeyCode::Char('f')).unwrap();
        type_text(&mut app, "dune");
        app.handle_key(KeyCode::Enter).unwrap();
        assert!(app.screen.books.is_empty());
        assert_eq!(app.status_text(), Some("No books found."));

        app.handle_key(KeyCode::Esc).unwrap();
        assert_eq!(app.screen.kind, ListKind::All);

        app.handle_key(KeyCode::Char('5')).unwrap();
        app.handle_key(KeyCode::Enter).unwrap();
        app.handle_key(KeyCode::Char('4')).unwrap();
        let ids: Vec<i64> = app.screen.books.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 2);
        assert!(app
            .screen
            .books
            .iter()
            .all(|book| app.catalog().get(book.id).unwrap().available));
    }

    #[test]
    fn exit_keys_end_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert!(app.handle_key(KeyCode::Char('7')).unwrap());
        assert!(app.handle_key(KeyCode::Esc).unwrap());

        app.handle_key(KeyCode::Char('4')).unwrap();
        assert!(!app.handle_key(KeyCode::Esc).unwrap());
        assert!(app.handle_key(KeyCode::Char('q')).unwrap());
    }

    #[test]
    fn ctrl_s_writes_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        add_via_form(&mut app, "Dune", "Herbert", "1965");

        app.handle_ctrl_s().unwrap();
        let written = std::fs::read_to_string(dir.path().join("library.csv")).unwrap();
        assert_eq!(written, "1,Dune,Herbert,1965,1\n");
        assert!(app.status_text().unwrap().starts_with("Saved 1 books"));
        app.into_session().close().unwrap();
    }

    #[test]
    fn draw_lists_books_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert!(rendered(&app).contains("No books yet"));

        add_via_form(&mut app, "Dune", "Herbert", "1965");
        let screen = rendered(&app);
        assert!(screen.contains("All Books (1)"));
        assert!(screen.contains("Dune"));
        assert!(screen.contains("available"));
        assert!(screen.contains("Added book 1"));

        app.handle_key(KeyCode::Char('1')).unwrap();
        assert!(rendered(&app).contains("Add Book"));
    }
}
