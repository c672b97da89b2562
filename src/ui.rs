use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position},
    prelude::*,
    widgets::Paragraph,
};

use crate::app::{App, Dialog};
use crate::widgets::{
    AboutDialog, ConfirmDialog, EditorView, PathPrompt, ShortcutsOverlay, ToastWidget,
};

impl App {
    /// Main render function: header bar, editor area, status line, then any
    /// open dialog and the active toasts on top.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header bar
                Constraint::Min(1),    // Editor area
                Constraint::Length(1), // Status line
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_editor(f, chunks[1]);
        self.render_status_line(f, chunks[2]);

        match &self.dialog {
            Some(Dialog::Confirm { selected }) => {
                f.render_widget(
                    ConfirmDialog {
                        message: "The document has unsaved changes.",
                        selected: *selected,
                    },
                    f.area(),
                );
            }
            Some(Dialog::OpenPrompt { input }) => {
                let prompt = PathPrompt {
                    title: "Open File",
                    input,
                };
                let (x, y) = prompt.cursor_position(f.area());
                f.render_widget(prompt, f.area());
                f.set_cursor_position(Position::new(x, y));
            }
            Some(Dialog::SaveAsPrompt { input }) => {
                let prompt = PathPrompt {
                    title: "Save As",
                    input,
                };
                let (x, y) = prompt.cursor_position(f.area());
                f.render_widget(prompt, f.area());
                f.set_cursor_position(Position::new(x, y));
            }
            Some(Dialog::Shortcuts) => f.render_widget(ShortcutsOverlay, f.area()),
            Some(Dialog::About) => f.render_widget(AboutDialog, f.area()),
            None => {}
        }

        self.toasts.update();
        if self.toasts.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toasts), f.area());
        }
    }

    /// Header bar showing the derived document title.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title = self.session.title();
        let header = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::DarkGray));
        f.render_widget(header, area);
    }

    fn render_editor(&mut self, f: &mut Frame, area: Rect) {
        self.ensure_cursor_visible(area);

        f.render_widget(
            EditorView {
                surface: &self.surface,
                scroll_offset: self.scroll_offset,
                wrap: self.wrap,
            },
            area,
        );

        // The terminal cursor tracks the edit point unless a dialog owns it.
        if self.dialog.is_none() {
            let (row, col) = self.surface.cursor;
            let (scroll_row, scroll_col) = self.scroll_offset;
            let x = area.x + col.saturating_sub(scroll_col) as u16;
            let y = area.y + row.saturating_sub(scroll_row) as u16;
            if x < area.right() && y < area.bottom() {
                f.set_cursor_position(Position::new(x, y));
            }
        }
    }

    fn render_status_line(&self, f: &mut Frame, area: Rect) {
        let (row, col) = self.surface.cursor;
        let path = self
            .session
            .backing_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| String::from("no file"));

        let left = format!(" Ln {}, Col {}", row + 1, col + 1);
        let right = format!(
            "{} | wrap {} | {}px ",
            path,
            if self.wrap { "on" } else { "off" },
            self.font_size
        );

        let gap = (area.width as usize)
            .saturating_sub(left.chars().count() + right.chars().count());
        let status = Paragraph::new(Line::from(vec![
            Span::raw(left),
            Span::raw(" ".repeat(gap)),
            Span::styled(right, Style::default().fg(Color::Gray)),
        ]))
        .style(Style::default().bg(Color::Black).fg(Color::White));
        f.render_widget(status, area);
    }
}
