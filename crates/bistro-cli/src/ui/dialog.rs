//! Modal dialogs: the add/edit form and message boxes.

use bistro_core::FieldSpec;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
  Frame,
  buffer::Buffer,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

// ─── Form state ───────────────────────────────────────────────────────────────

/// What a key press did to an open form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormEvent {
  Continue,
  Submit,
  Cancel,
}

/// Editable copy of the fields shown in a form.
pub struct FormState<'f> {
  pub fields: &'f [FieldSpec],
  pub inputs: Vec<String>,
  pub focus:  usize,
}

impl<'f> FormState<'f> {
  pub fn new(fields: &'f [FieldSpec]) -> Self {
    let inputs = fields.iter().map(|f| f.value.clone()).collect();
    Self { fields, inputs, focus: 0 }
  }

  pub fn into_values(self) -> Vec<String> { self.inputs }

  pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
    match key.code {
      KeyCode::Esc => return FormEvent::Cancel,
      KeyCode::Enter => return FormEvent::Submit,
      KeyCode::Tab | KeyCode::Down => self.focus_by(1),
      KeyCode::BackTab | KeyCode::Up => self.focus_by(-1),
      KeyCode::Right if self.focused_is_choice() => self.cycle(1),
      KeyCode::Left if self.focused_is_choice() => self.cycle(-1),
      KeyCode::Backspace if !self.focused_is_choice() => {
        if let Some(input) = self.inputs.get_mut(self.focus) {
          input.pop();
        }
      }
      KeyCode::Char(c) if !self.focused_is_choice() => {
        if let Some(input) = self.inputs.get_mut(self.focus) {
          input.push(c);
        }
      }
      _ => {}
    }
    FormEvent::Continue
  }

  fn focused_is_choice(&self) -> bool {
    self.fields.get(self.focus).is_some_and(FieldSpec::is_choice)
  }

  fn focus_by(&mut self, step: isize) {
    let n = self.fields.len() as isize;
    if n > 0 {
      self.focus = (self.focus as isize + step).rem_euclid(n) as usize;
    }
  }

  /// Step through the offered ids. Optional fields include "none".
  fn cycle(&mut self, step: isize) {
    let field = &self.fields[self.focus];
    let mut options: Vec<String> = field.choices.iter().map(|c| c.id.to_string()).collect();
    if !field.required() {
      options.insert(0, String::new());
    }
    if options.is_empty() {
      return;
    }
    let current = &self.inputs[self.focus];
    let next = match options.iter().position(|o| o == current) {
      Some(i) => (i as isize + step).rem_euclid(options.len() as isize) as usize,
      None => 0,
    };
    self.inputs[self.focus] = options[next].clone();
  }

  /// What the user sees for field `i`.
  pub fn display(&self, i: usize) -> String {
    let field = &self.fields[i];
    let input = &self.inputs[i];
    if !field.is_choice() {
      return input.clone();
    }
    if input.is_empty() {
      return if field.choices.is_empty() { "(nothing to choose)".into() } else { "(none)".into() };
    }
    match field.choice_label(input) {
      Some(label) => format!("{label} (#{input})"),
      None => format!("#{input}"),
    }
  }
}

// ─── Drawing ──────────────────────────────────────────────────────────────────

/// Repaint a previously drawn frame, dimmed, as the background of a dialog.
pub fn draw_backdrop(f: &mut Frame, backdrop: &Buffer) {
  let area = f.area().intersection(backdrop.area);
  let buf = f.buffer_mut();
  for y in area.top()..area.bottom() {
    for x in area.left()..area.right() {
      if let (Some(dst), Some(src)) = (buf.cell_mut((x, y)), backdrop.cell((x, y))) {
        *dst = src.clone();
      }
    }
  }
  buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
}

pub fn draw_form(f: &mut Frame, title: &str, form: &FormState<'_>) {
  let height = form.fields.len() as u16 + 4;
  let area = centered(f.area(), 60, height);
  f.render_widget(Clear, area);

  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let label_width = form.fields.iter().map(|f| f.label.len()).max().unwrap_or(0) + 2;

  let mut lines: Vec<Line> = form
    .fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let focused = i == form.focus;
      let marker = if field.required() { "*" } else { " " };
      let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
      } else {
        Style::default()
      };
      let mut value = form.display(i);
      if focused && !field.is_choice() {
        value.push('_');
      }
      if focused && field.is_choice() {
        value = format!("◀ {value} ▶");
      }
      Line::from(vec![
        Span::styled(
          format!("{marker}{:<label_width$}", field.label),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, value_style),
      ])
    })
    .collect();

  lines.push(Line::default());
  lines.push(Line::from(Span::styled(
    "Tab/↑↓ field  ←→ choice  Enter ok  Esc cancel",
    Style::default().fg(Color::DarkGray),
  )));

  f.render_widget(Paragraph::new(lines), inner);
}

#[derive(Debug, Clone, Copy)]
pub enum Tone {
  Info,
  Question,
  Warning,
  Error,
}

impl Tone {
  fn color(self) -> Color {
    match self {
      Tone::Info => Color::Cyan,
      Tone::Question => Color::Blue,
      Tone::Warning => Color::Yellow,
      Tone::Error => Color::Red,
    }
  }
}

pub fn draw_message(f: &mut Frame, tone: Tone, title: &str, message: &str, hint: &str) {
  let lines = message.lines().count() as u16;
  let area = centered(f.area(), 60, lines + 5);
  f.render_widget(Clear, area);

  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(tone.color()));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(1), Constraint::Length(1)])
    .split(inner);

  f.render_widget(Paragraph::new(message.to_owned()).wrap(Wrap { trim: false }), rows[0]);
  f.render_widget(
    Paragraph::new(Span::styled(hint.to_owned(), Style::default().fg(Color::DarkGray))),
    rows[1],
  );
}

/// A `width` × `height` rectangle centred in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

#[cfg(test)]
mod tests {
  use bistro_core::{
    Adapter, Catalog, ChoiceSet, EntityAdapter, EntityKind, REGISTRY, ResultSet, Row, Value,
  };
  use crossterm::event::KeyModifiers;
  use ratatui::{Terminal, backend::TestBackend};

  use super::*;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn cook_fields() -> Vec<FieldSpec> {
    let catalog = Catalog::resolve(&REGISTRY, &[]);
    let adapter = Adapter::bind(catalog.get(EntityKind::Cook).cloned().unwrap(), &catalog);
    let mut choices = ChoiceSet::default();
    choices.insert("specialty_id", ResultSet {
      head: vec![],
      rows: vec![
        Row(vec![Value::Integer(1), "soup".into()]),
        Row(vec![Value::Integer(2), "dessert".into()]),
      ],
    });
    adapter.dialog_fields(None, &choices)
  }

  #[test]
  fn typing_edits_focused_text_field() {
    let fields = cook_fields();
    let mut form = FormState::new(&fields);
    for c in "Jo".chars() {
      assert_eq!(form.handle_key(key(KeyCode::Char(c))), FormEvent::Continue);
    }
    form.handle_key(key(KeyCode::Backspace));
    assert_eq!(form.inputs[0], "J");
  }

  #[test]
  fn choice_fields_cycle_through_none_and_ids() {
    let fields = cook_fields();
    let mut form = FormState::new(&fields);
    form.handle_key(key(KeyCode::BackTab));
    assert_eq!(form.focus, 2);

    form.handle_key(key(KeyCode::Char('x')));
    assert_eq!(form.inputs[2], "");
    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.inputs[2], "1");
    assert_eq!(form.display(2), "soup (#1)");
    form.handle_key(key(KeyCode::Right));
    form.handle_key(key(KeyCode::Right));
    assert_eq!(form.inputs[2], "");
    form.handle_key(key(KeyCode::Left));
    assert_eq!(form.inputs[2], "2");
  }

  #[test]
  fn enter_and_esc_finish_the_form() {
    let fields = cook_fields();
    let mut form = FormState::new(&fields);
    assert_eq!(form.handle_key(key(KeyCode::Enter)), FormEvent::Submit);
    assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancel);
    assert_eq!(form.into_values(), ["", "0", ""]);
  }

  #[test]
  fn dialogs_draw_over_the_previous_frame() {
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    let mut backdrop = Buffer::empty(Rect::new(0, 0, 80, 20));
    backdrop.set_string(0, 0, "Dish", Style::default());

    terminal
      .draw(|f| {
        draw_backdrop(f, &backdrop);
        draw_message(f, Tone::Info, "Information", "No selected rows", "Enter/Esc close");
      })
      .unwrap();

    let buf = terminal.backend().buffer();
    assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "D");
    assert!(buf.cell((0, 0)).unwrap().modifier.contains(Modifier::DIM));
    let text: String = (0..80).map(|x| buf.cell((x, 8)).unwrap().symbol()).collect();
    assert!(text.contains("No selected rows"), "{text:?}");
  }

  #[test]
  fn centered_fits_small_areas() {
    let area = Rect { x: 0, y: 0, width: 20, height: 5 };
    let r = centered(area, 60, 10);
    assert_eq!((r.width, r.height), (20, 5));
  }
}
