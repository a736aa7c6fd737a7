use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::models::{Account, AccountSnapshot};

use super::forms::{TitleAction, TitleForm};
use super::helpers::{build_detail_lines, centered_rect, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the menu column on the left-hand side.
const MENU_WIDTH: u16 = 34;
/// Menu rows in display order; the leading digit is the key that selects it.
const MENU_ITEMS: &[&str] = &[
    "1. Issue a book",
    "2. Return a book",
    "3. Display account details",
    "4. Close account",
    "5. Exit",
];

/// Either browsing the menu or typing a title into the modal form.
enum Mode {
    Menu,
    EnteringTitle(TitleForm),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
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

/// Shell state. The account is handed in by the caller and only ever touched
/// through its public operations.
pub struct App {
    account: Account,
    mode: Mode,
    details: AccountSnapshot,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(account: Account) -> Self {
        let details = account.display();
        Self {
            account,
            mode: Mode::Menu,
            details,
            status: None,
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn into_account(self) -> Account {
        self.account
    }

    /// Feed one key press into the shell. Returns `true` once the loop should
    /// stop.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Menu);

        self.mode = match mode {
            Mode::Menu => self.handle_menu_key(code, &mut exit),
            Mode::EnteringTitle(form) => self.handle_title_form(code, form)?,
        };

        Ok(exit)
    }

    fn handle_menu_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('1') => {
                self.clear_status();
                return Mode::EnteringTitle(TitleForm::new(TitleAction::Issue));
            }
            KeyCode::Char('2') => {
                self.clear_status();
                return Mode::EnteringTitle(TitleForm::new(TitleAction::Return));
            }
            KeyCode::Char('3') => {
                self.details = self.account.display();
                self.set_status("Account details refreshed.", StatusKind::Info);
            }
            KeyCode::Char('4') => {
                self.account.close_account();
                self.details = self.account.display();
                self.set_status("Account closed successfully.", StatusKind::Info);
                *exit = true;
            }
            KeyCode::Char('5') | KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            other => {
                debug!(?other, "unrecognised menu key");
                self.set_status("Invalid choice. Please try again.", StatusKind::Error);
            }
        }
        Mode::Menu
    }

    fn handle_title_form(&mut self, code: KeyCode, mut form: TitleForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                let verb = match form.action {
                    TitleAction::Issue => "Issue",
                    TitleAction::Return => "Return",
                };
                self.set_status(format!("{verb} cancelled."), StatusKind::Info);
                keep_open = false;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.submit_title(&form) {
                Ok(()) => keep_open = false,
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
            Ok(Mode::EnteringTitle(form))
        } else {
            Ok(Mode::Menu)
        }
    }

    fn submit_title(&mut self, form: &TitleForm) -> Result<()> {
        let title = form.parse_input();
        match form.action {
            TitleAction::Issue => {
                self.account
                    .try_issue_book(&title)
                    .context("failed to issue book")?;
                self.set_status(
                    format!("Successfully issued book: {title}"),
                    StatusKind::Info,
                );
            }
            TitleAction::Return => {
                self.account
                    .try_return_book(&title)
                    .context("failed to return book")?;
                self.set_status(
                    format!("Successfully returned book: {title}"),
                    StatusKind::Info,
                );
            }
        }
        Ok(())
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

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(MENU_WIDTH), Constraint::Min(0)])
            .split(content_area);

        self.draw_menu(frame, columns[0]);
        self.draw_details(frame, columns[1]);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::EnteringTitle(form) = &self.mode {
            self.draw_title_form(frame, area, form);
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .map(|item| ListItem::new(Line::from(*item)))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(" LIBRARY SYSTEM ")
                .borders(Borders::ALL),
        );
        frame.render_widget(list, area);
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.account.is_active() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(" Account ")
            .borders(Borders::ALL)
            .border_style(border_style);
        let paragraph = Paragraph::new(build_detail_lines(&self.details))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
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

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::EnteringTitle(_) => Line::from(vec![
                Span::styled("[Enter]", key_style),
                Span::raw(" Submit   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::Menu => Line::from(vec![
                Span::styled("[1-5]", key_style),
                Span::raw(" Choose   "),
                Span::styled("[q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_title_form(&self, frame: &mut Frame, area: Rect, form: &TitleForm) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(form.action.heading())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![form.build_line(), Line::from("")];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to submit • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let offset = u16::try_from(form.cursor_offset()).unwrap_or(u16::MAX);
        let cursor_x = inner
            .x
            .saturating_add(offset)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position((cursor_x, inner.y));
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
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::models::MAX_BOOKS;

    fn app() -> App {
        App::new(Account::new("Alice", "123 Main St", 1).unwrap())
    }

    fn type_title(app: &mut App, title: &str) {
        for ch in title.chars() {
            assert!(!app.handle_key(KeyCode::Char(ch)).unwrap());
        }
    }

    fn issue(app: &mut App, title: &str) {
        assert!(!app.handle_key(KeyCode::Char('1')).unwrap());
        type_title(app, title);
        assert!(!app.handle_key(KeyCode::Enter).unwrap());
    }

    fn status_text(app: &App) -> Option<&str> {
        app.status.as_ref().map(|status| status.text.as_str())
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn issuing_through_the_form_updates_the_account() {
        let mut app = app();
        issue(&mut app, "Dune");

        assert_eq!(app.account().issued_titles(), ["Dune".to_string()]);
        assert_eq!(status_text(&app), Some("Successfully issued book: Dune"));
        assert!(matches!(app.mode, Mode::Menu));
    }

    #[test]
    fn rejected_issue_keeps_form_open_with_reason() {
        let mut app = app();
        issue(&mut app, "Dune");
        issue(&mut app, "Dune");

        match &app.mode {
            Mode::EnteringTitle(form) => assert_eq!(
                form.error.as_deref(),
                Some("This book is already issued to you.")
            ),
            Mode::Menu => panic!("form should stay open after a rejected issue"),
        }
        assert_eq!(app.account().books_issued(), 1);
    }

    #[test]
    fn blank_title_is_rejected_by_the_account() {
        let mut app = app();
        issue(&mut app, "   ");

        assert_eq!(status_text(&app), Some("Book name cannot be empty."));
        assert_eq!(app.account().books_issued(), 0);
    }

    #[test]
    fn escape_cancels_the_form() {
        let mut app = app();
        app.handle_key(KeyCode::Char('2')).unwrap();
        type_title(&mut app, "Dune");
        assert!(!app.handle_key(KeyCode::Esc).unwrap());

        assert!(matches!(app.mode, Mode::Menu));
        assert_eq!(status_text(&app), Some("Return cancelled."));
    }

    #[test]
    fn returning_through_the_form() {
        let mut app = app();
        issue(&mut app, "Dune");

        app.handle_key(KeyCode::Char('2')).unwrap();
        type_title(&mut app, "Dune");
        app.handle_key(KeyCode::Enter).unwrap();

        assert!(app.account().issued_titles().is_empty());
        assert_eq!(app.account().returned_titles(), ["Dune".to_string()]);
        assert_eq!(status_text(&app), Some("Successfully returned book: Dune"));
    }

    #[test]
    fn capacity_error_reaches_the_footer() {
        let mut app = app();
        for title in ["A", "B", "C", "D", "E"] {
            issue(&mut app, title);
        }
        assert_eq!(app.account().books_issued(), MAX_BOOKS);

        issue(&mut app, "F");

        assert_eq!(
            status_text(&app),
            Some("Maximum number of books (5) already issued.")
        );
    }

    #[test]
    fn display_refreshes_the_snapshot() {
        let mut app = app();
        issue(&mut app, "Dune");
        assert_eq!(app.details.books_issued, 0);

        assert!(!app.handle_key(KeyCode::Char('3')).unwrap());

        assert_eq!(app.details.books_issued, 1);
        assert_eq!(app.details.issued_titles, ["Dune".to_string()]);
    }

    #[test]
    fn close_account_ends_the_loop() {
        let mut app = app();
        issue(&mut app, "Dune");

        assert!(app.handle_key(KeyCode::Char('4')).unwrap());

        let account = app.into_account();
        assert!(!account.is_active());
        assert_eq!(account.books_issued(), 0);
    }

    #[test]
    fn exit_leaves_account_untouched() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('5')).unwrap());
        assert!(app.account().is_active());
    }

    #[test]
    fn unknown_menu_key_reports_invalid_choice() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('9')).unwrap());
        assert_eq!(status_text(&app), Some("Invalid choice. Please try again."));
    }

    #[test]
    fn renders_menu_and_details() {
        let mut app = app();
        issue(&mut app, "Dune");
        app.handle_key(KeyCode::Char('3')).unwrap();

        let screen = render(&app);

        assert!(screen.contains("LIBRARY SYSTEM"));
        assert!(screen.contains("3. Display account details"));
        assert!(screen.contains("Name: Alice"));
        assert!(screen.contains("Books Currently Issued: Dune"));
        assert!(screen.contains("Account details refreshed."));
    }

    #[test]
    fn renders_title_form_over_the_menu() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1')).unwrap();
        type_title(&mut app, "Emma");

        let screen = render(&app);

        assert!(screen.contains("Enter to submit"));
        assert!(screen.contains("Title to issue: Emma"));
    }
}
