//! Modal dialogs: the unsaved-changes confirmation gate, the open and
//! save-as path prompts, and the shortcuts/about overlays. All render
//! centered over the editor; while one is up, the app routes every key to
//! it, so no second dialog can be opened underneath.

use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::session::GateChoice;

/// Button order in the confirmation gate.
pub const GATE_CHOICES: [GateChoice; 3] = [GateChoice::Save, GateChoice::Discard, GateChoice::Cancel];

fn choice_label(choice: GateChoice) -> &'static str {
    match choice {
        GateChoice::Save => "Save",
        GateChoice::Discard => "Discard",
        GateChoice::Cancel => "Cancel",
    }
}

/// Center a `width` x `height` box inside `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black))
}

/// The three-way Save / Discard / Cancel gate shown before a destructive
/// operation on a dirty document.
pub struct ConfirmDialog<'a> {
    pub message: &'a str,
    pub selected: usize,
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let width = 52.min(area.width.saturating_sub(4));
        let dialog_area = centered_rect(width, 6, area);
        Clear.render(dialog_area, buf);

        let block = dialog_block("Unsaved Changes");
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let mut buttons: Vec<Span> = Vec::new();
        for (i, choice) in GATE_CHOICES.iter().enumerate() {
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buttons.push(Span::styled(format!("[ {} ]", choice_label(*choice)), style));
            buttons.push(Span::raw("  "));
        }

        let lines = vec![
            Line::from(self.message),
            Line::from(""),
            Line::from(buttons).alignment(Alignment::Center),
        ];
        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(inner, buf);
    }
}

/// Single-line path prompt used for open and save-as.
pub struct PathPrompt<'a> {
    pub title: &'a str,
    pub input: &'a str,
}

impl PathPrompt<'_> {
    /// Screen position for the text cursor, at the end of the input.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let dialog_area = self.dialog_area(area);
        let x = dialog_area.x + 3 + self.input.chars().count() as u16;
        let y = dialog_area.y + 1;
        (x.min(dialog_area.right().saturating_sub(2)), y)
    }

    fn dialog_area(&self, area: Rect) -> Rect {
        let width = 60.min(area.width.saturating_sub(4));
        centered_rect(width, 3, area)
    }
}

impl Widget for PathPrompt<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let dialog_area = self.dialog_area(area);
        Clear.render(dialog_area, buf);

        let block = dialog_block(self.title);
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let line = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::styled(self.input, Style::default().fg(Color::White)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

/// Keyboard shortcuts overlay.
pub struct ShortcutsOverlay;

impl Widget for ShortcutsOverlay {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let bindings = [
            ("Ctrl+N", "New document"),
            ("Ctrl+O", "Open file"),
            ("Ctrl+S", "Save"),
            ("Ctrl+Shift+S", "Save as"),
            ("Alt+Z", "Toggle word wrap"),
            ("Ctrl+= / Ctrl+-", "Font size"),
            ("F1", "Keyboard shortcuts"),
            ("F2", "About"),
            ("Ctrl+Q", "Quit"),
        ];

        let height = bindings.len() as u16 + 3;
        let width = 44.min(area.width.saturating_sub(4));
        let dialog_area = centered_rect(width, height, area);
        Clear.render(dialog_area, buf);

        let block = dialog_block("Keyboard Shortcuts");
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let mut lines: Vec<Line> = bindings
            .iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", keys), Style::default().fg(Color::Cyan)),
                    Span::raw(*action),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "Esc to close",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        );

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(inner, buf);
    }
}

/// About overlay.
pub struct AboutDialog;

impl Widget for AboutDialog {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let width = 40.min(area.width.saturating_sub(4));
        let dialog_area = centered_rect(width, 7, area);
        Clear.render(dialog_area, buf);

        let block = dialog_block("About");
        let inner = block.inner(dialog_area);
        block.render(dialog_area, buf);

        let lines = vec![
            Line::from(Span::styled(
                "texty2",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(format!("version {}", env!("CARGO_PKG_VERSION")))
                .alignment(Alignment::Center),
            Line::from("A minimal text editor").alignment(Alignment::Center),
            Line::from(""),
            Line::from(Span::styled(
                "Esc to close",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ];

        Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .render(inner, buf);
    }
}
