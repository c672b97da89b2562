use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::surface::Surface;

/// Renders the text surface. With wrap off the view scrolls both ways; with
/// wrap on, long lines soft-wrap and only vertical scrolling applies.
pub struct EditorView<'a> {
    pub surface: &'a Surface,
    pub scroll_offset: (usize, usize),
    pub wrap: bool,
}

impl<'a> EditorView<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self {
            surface,
            scroll_offset: (0, 0),
            wrap: false,
        }
    }
}

impl Widget for EditorView<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let (start_row, h_offset) = self.scroll_offset;
        let end_row = (start_row + area.height as usize).min(self.surface.line_count());

        let mut lines = Vec::with_capacity(end_row.saturating_sub(start_row));
        for i in start_row..end_row {
            let line = &self.surface.lines[i];
            let visible = if self.wrap {
                line.as_str()
            } else {
                // Character-based horizontal clipping; lines may hold
                // multi-byte characters.
                let byte = line
                    .char_indices()
                    .nth(h_offset)
                    .map(|(b, _)| b)
                    .unwrap_or(line.len());
                &line[byte..]
            };
            lines.push(Line::from(visible));
        }

        let mut paragraph =
            Paragraph::new(lines).style(Style::default().fg(Color::White).bg(Color::Black));
        if self.wrap {
            paragraph = paragraph.wrap(Wrap { trim: false });
        }
        paragraph.render(area, buf);
    }
}
