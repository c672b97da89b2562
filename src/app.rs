use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event, KeyEventKind},
    layout::Rect,
    Terminal,
};

use crate::config::PrefStore;
use crate::session::DocumentSession;
use crate::surface::Surface;
use crate::widgets::toast::ToastManager;

pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;

/// How long a resize must stay quiet before the dimensions are committed
/// to the preference store.
const RESIZE_SETTLE: Duration = Duration::from_millis(500);

/// The modal currently routing all key input, if any.
///
/// At most one dialog is ever open; while it is, the triggering shortcuts
/// are unreachable, so a confirmation gate cannot be stacked on another.
pub enum Dialog {
    /// The unsaved-changes gate; the continuation it guards lives in the
    /// session's single pending slot.
    Confirm { selected: usize },
    OpenPrompt { input: String },
    SaveAsPrompt { input: String },
    Shortcuts,
    About,
}

/// One window: the text surface, its document session, preferences and
/// transient UI state.
pub struct App {
    /// Whether the application is running.
    pub running: bool,

    /// The editable text buffer.
    pub surface: Surface,

    /// Dirty/backing-path state machine for the document.
    pub session: DocumentSession,

    /// Scroll position of the editor viewport.
    pub scroll_offset: (usize, usize),

    /// The open modal dialog, if any.
    pub dialog: Option<Dialog>,

    /// Toast notification manager.
    pub toasts: ToastManager,

    /// Persisted preferences.
    pub prefs: PrefStore,

    /// Word wrap, mirrored from preferences.
    pub wrap: bool,

    /// Font size, mirrored from preferences.
    pub font_size: u16,

    /// Last resize not yet committed to the preference store.
    pending_resize: Option<((u16, u16), Instant)>,
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("texty2")
}

impl App {
    pub async fn new() -> Self {
        Self::with_config_dir(default_config_dir()).await
    }

    /// Build a window reading preferences from `config_dir`. Preference
    /// problems are reported and defaults apply; they never prevent startup.
    pub async fn with_config_dir(config_dir: PathBuf) -> Self {
        if !config_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&config_dir).await {
                eprintln!("Warning: Could not create config directory: {}", e);
            }
        }

        let mut prefs = PrefStore::new(&config_dir);
        if let Err(e) = prefs.load() {
            eprintln!("Warning: Could not load preferences: {}", e);
        }
        let wrap = prefs.prefs().wrap_mode;
        let font_size = prefs.prefs().font_size;

        Self {
            running: true,
            surface: Surface::new(),
            session: DocumentSession::new(),
            scroll_offset: (0, 0),
            dialog: None,
            toasts: ToastManager::new(),
            prefs,
            wrap,
            font_size,
            pending_resize: None,
        }
    }

    pub async fn with_file(file_path: &str) -> Result<Self> {
        let mut app = Self::new().await;
        app.session
            .open(&mut app.surface, PathBuf::from(file_path))
            .map_err(|e| anyhow!("Failed to open file '{}': {}", file_path, e))?;
        Ok(app)
    }

    /// Main event loop: draw at a ~16ms frame budget, poll for input
    /// without blocking, and commit preferences when a resize settles and
    /// at shutdown.
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let frame_duration = Duration::from_millis(16);
        let mut last_frame = Instant::now();

        while self.running {
            let now = Instant::now();
            if now.duration_since(last_frame) >= frame_duration {
                terminal.draw(|f| self.render(f))?;
                last_frame = now;
            }

            self.flush_settled_resize();

            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        self.handle_key(key)?;
                    }
                    Event::Resize(width, height) => self.note_resize(width, height),
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        // Window close: commit final dimensions and preferences.
        if let Ok(size) = terminal.size() {
            let prefs = self.prefs.prefs_mut();
            prefs.window_width = size.width;
            prefs.window_height = size.height;
        }
        if let Err(e) = self.prefs.save() {
            eprintln!("Warning: Could not save preferences: {}", e);
        }

        Ok(())
    }

    /// Record a resize; it is committed once no further resize arrives
    /// within the settle window.
    pub fn note_resize(&mut self, width: u16, height: u16) {
        self.pending_resize = Some(((width, height), Instant::now()));
    }

    pub fn flush_settled_resize(&mut self) {
        if let Some(((width, height), at)) = self.pending_resize {
            if at.elapsed() >= RESIZE_SETTLE {
                self.pending_resize = None;
                let prefs = self.prefs.prefs_mut();
                prefs.window_width = width;
                prefs.window_height = height;
                self.persist_prefs();
            }
        }
    }

    /// Toggle word wrap and push the value to the preference store.
    pub fn toggle_wrap(&mut self) {
        self.wrap = !self.wrap;
        self.prefs.prefs_mut().wrap_mode = self.wrap;
        self.persist_prefs();
        self.toasts
            .info(if self.wrap { "Word wrap on" } else { "Word wrap off" });
    }

    /// Set the font size (clamped) and push it to the preference store.
    pub fn set_font_size(&mut self, size: u16) {
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if size != self.font_size {
            self.font_size = size;
            self.prefs.prefs_mut().font_size = size;
            self.persist_prefs();
        }
    }

    pub fn adjust_font_size(&mut self, delta: i32) {
        let size = (self.font_size as i32 + delta).clamp(MIN_FONT_SIZE as i32, MAX_FONT_SIZE as i32);
        self.set_font_size(size as u16);
    }

    /// Fire-and-forget preference write; failures surface as a toast.
    pub fn persist_prefs(&mut self) {
        if let Err(e) = self.prefs.save() {
            self.toasts.error(format!("Error saving preferences: {}", e));
        }
    }

    /// Keep the cursor inside the viewport by adjusting the scroll offset.
    pub fn ensure_cursor_visible(&mut self, area: Rect) {
        let (row, col) = self.surface.cursor;
        let (scroll_row, scroll_col) = self.scroll_offset;

        let visible_rows = area.height.max(1) as usize;
        if row < scroll_row {
            self.scroll_offset.0 = row;
        } else if row >= scroll_row + visible_rows {
            self.scroll_offset.0 = row - visible_rows + 1;
        }

        if self.wrap {
            // Soft-wrapped lines never scroll horizontally.
            self.scroll_offset.1 = 0;
            return;
        }

        let visible_cols = area.width.max(1) as usize;
        if col < scroll_col {
            self.scroll_offset.1 = col;
        } else if col >= scroll_col + visible_cols {
            self.scroll_offset.1 = col - visible_cols + 1;
        }
    }
}
