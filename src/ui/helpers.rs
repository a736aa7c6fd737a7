use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::AccountSnapshot;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Style the details block: bold heading, labels in cyan, values plain.
pub(crate) fn build_detail_lines(snapshot: &AccountSnapshot) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::Cyan);
    let mut rows = snapshot.lines().into_iter();

    let mut lines = Vec::new();
    if let Some(heading) = rows.next() {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }

    for row in rows {
        match row.split_once(": ") {
            Some((label, value)) => lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), label_style),
                Span::raw(value.to_string()),
            ])),
            None => lines.push(Line::from(row)),
        }
    }

    lines
}
