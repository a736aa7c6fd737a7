use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Which account operation a title form submits to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TitleAction {
    Issue,
    Return,
}

impl TitleAction {
    /// Heading rendered on the modal border.
    pub(crate) fn heading(self) -> &'static str {
        match self {
            TitleAction::Issue => "Issue a book",
            TitleAction::Return => "Return a book",
        }
    }

    /// Prompt shown in front of the input field.
    pub(crate) fn prompt(self) -> &'static str {
        match self {
            TitleAction::Issue => "Title to issue",
            TitleAction::Return => "Title to return",
        }
    }
}

/// Input state for the single-field title form.
#[derive(Clone, Debug)]
pub(crate) struct TitleForm {
    pub(crate) action: TitleAction,
    pub(crate) title: String,
    pub(crate) error: Option<String>,
}

impl TitleForm {
    pub(crate) fn new(action: TitleAction) -> Self {
        Self {
            action,
            title: String::new(),
            error: None,
        }
    }

    /// Append a character, ignoring control input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.title.push(ch);
        true
    }

    pub(crate) fn backspace(&mut self) {
        self.title.pop();
    }

    /// Title with surrounding whitespace removed. Emptiness is left for the
    /// account to reject so the patron sees the same message everywhere.
    pub(crate) fn parse_input(&self) -> String {
        self.title.trim().to_string()
    }

    /// Render the input row with a placeholder while nothing is typed.
    pub(crate) fn build_line(&self) -> Line<'static> {
        let (display, style) = if self.title.is_empty() {
            ("<required>".to_string(), Style::default().fg(Color::DarkGray))
        } else {
            (self.title.clone(), Style::default().fg(Color::Yellow))
        };

        Line::from(vec![
            Span::raw(format!("{}: ", self.action.prompt())),
            Span::styled(display, style),
        ])
    }

    /// Cursor column offset inside the form, after the prompt and typed text.
    pub(crate) fn cursor_offset(&self) -> usize {
        self.action.prompt().chars().count() + 2 + self.title.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_ignores_control_characters() {
        let mut form = TitleForm::new(TitleAction::Issue);
        assert!(form.push_char('D'));
        assert!(!form.push_char('\u{7}'));
        assert!(form.push_char('u'));
        form.backspace();
        assert_eq!(form.title, "D");
    }

    #[test]
    fn parse_input_trims_whitespace() {
        let mut form = TitleForm::new(TitleAction::Return);
        for ch in "  Dune ".chars() {
            form.push_char(ch);
        }
        assert_eq!(form.parse_input(), "Dune");
    }

    #[test]
    fn cursor_tracks_typed_text() {
        let mut form = TitleForm::new(TitleAction::Issue);
        let empty = form.cursor_offset();
        form.push_char('é');
        assert_eq!(form.cursor_offset(), empty + 1);
    }
}
