use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    fn color(&self) -> Color {
        match self {
            ToastKind::Info => Color::Cyan,
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Info => "ℹ",
            ToastKind::Success => "✓",
            ToastKind::Error => "✗",
        }
    }
}

/// A single transient notification. Fire-and-forget: it expires on its own
/// and requires no acknowledgment.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: String, kind: ToastKind) -> Self {
        Self {
            message,
            kind,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Holds the active toasts and renders them stacked in the top-right corner.
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: 4,
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
        while self.toasts.len() > self.max_toasts {
            self.toasts.remove(0);
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastKind::Info));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastKind::Success));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::new(message.into(), ToastKind::Error));
    }

    /// Drop expired toasts.
    pub fn update(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn render(&self, area: Rect, buf: &mut TuiBuffer) {
        if self.toasts.is_empty() {
            return;
        }

        let width = 44.min(area.width.saturating_sub(4));
        for (i, toast) in self.toasts.iter().enumerate() {
            let toast_area = Rect {
                x: area.width.saturating_sub(width + 2),
                y: 1 + i as u16 * 3,
                width,
                height: 3,
            };
            if toast_area.bottom() > area.height {
                break;
            }
            render_toast(toast, toast_area, buf);
        }
    }
}

fn render_toast(toast: &Toast, area: Rect, buf: &mut TuiBuffer) {
    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(toast.kind.color()));
    let inner = block.inner(area);
    block.render(area, buf);

    let max_len = (inner.width as usize).saturating_sub(2);
    let message: String = if toast.message.chars().count() > max_len {
        let mut truncated: String = toast
            .message
            .chars()
            .take(max_len.saturating_sub(1))
            .collect();
        truncated.push('…');
        truncated
    } else {
        toast.message.clone()
    };

    let line = Line::from(vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            Style::default()
                .fg(toast.kind.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(message),
    ]);
    Paragraph::new(line).render(inner, buf);
}

/// Widget wrapper so toasts render like any other widget.
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        self.manager.render(area, buf);
    }
}
