//! The three form inputs, stacked vertically.

use folio_core::submission::Field;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Position, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{app::App, form::ContactTransport};

/// Render the form into `area` and place the cursor in the focused field.
pub fn draw<T: ContactTransport + 'static>(f: &mut Frame, area: Rect, app: &App<T>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(3),
      Constraint::Length(3),
      Constraint::Min(5),
    ])
    .split(area);

  let values = app.form.fields();
  let locked = app.form.is_submitting();

  for (field, rect) in Field::ALL.into_iter().zip(rows.iter().copied()) {
    let focused = field == app.focus;
    let border = match (focused, locked) {
      (true, false) => Style::default().fg(Color::Cyan),
      (true, true) => Style::default().fg(Color::Yellow),
      (false, _) => Style::default().fg(Color::DarkGray),
    };
    let title_style = if focused {
      border.add_modifier(Modifier::BOLD)
    } else {
      border
    };

    let block = Block::default()
      .title(Line::styled(format!(" {} ", label(field)), title_style))
      .borders(Borders::ALL)
      .border_style(border);
    let inner = block.inner(rect);

    let text = values.get(field);
    let mut paragraph = Paragraph::new(text.to_owned()).block(block);
    if field == Field::Message {
      paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, rect);

    if focused && !locked {
      f.set_cursor_position(cursor(inner, text));
    }
  }
}

fn label(field: Field) -> &'static str {
  match field {
    Field::Name => "Name",
    Field::Email => "Email",
    Field::Message => "Message",
  }
}

/// Position just past the last character of `text` inside `inner`.
///
/// Long lines are assumed to wrap at the inner width.
fn cursor(inner: Rect, text: &str) -> Position {
  let width = inner.width.max(1) as usize;
  let mut row = 0usize;
  let mut col = 0usize;
  for (i, line) in text.split('\n').enumerate() {
    if i > 0 {
      row += 1;
    }
    let chars = line.chars().count();
    row += chars / width;
    col = chars % width;
  }
  let max_row = inner.height.saturating_sub(1) as usize;
  Position::new(
    inner.x + col as u16,
    inner.y + row.min(max_row) as u16,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cursor_tracks_newlines_and_wrapping() {
    let inner = Rect::new(1, 1, 10, 5);
    assert_eq!(cursor(inner, ""), Position::new(1, 1));
    assert_eq!(cursor(inner, "abc"), Position::new(4, 1));
    assert_eq!(cursor(inner, "abc\nde"), Position::new(3, 2));
    assert_eq!(cursor(inner, "0123456789ab"), Position::new(3, 2));
  }

  #[test]
  fn cursor_stays_inside_the_block() {
    let inner = Rect::new(0, 0, 10, 2);
    assert_eq!(cursor(inner, "a\nb\nc\nd"), Position::new(1, 1));
  }
}
