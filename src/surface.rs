//! # Text Surface
//!
//! The editable text buffer behind the window: content stored as lines,
//! a cursor, and a content-changed flag.
//!
//! Every mutation raises the changed flag, including programmatic
//! `set_text`. The session drains the flag right after loading or clearing
//! content so that a fresh document does not start out marked dirty; user
//! edits are drained by the app loop into `DocumentSession::mark_dirty`.

/// Cursor movement commands understood by the surface.
pub enum CursorMovement {
    Up,
    Down,
    Left,
    Right,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

pub struct Surface {
    /// Buffer content, one entry per line, never empty.
    pub lines: Vec<String>,
    /// Cursor position as (row, column).
    pub cursor: (usize, usize),
    changed: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: (0, 0),
            changed: false,
        }
    }

    /// Full buffer content joined with `\n`. No trailing newline is added;
    /// content round-trips byte for byte through `set_text`.
    pub fn text(&self) -> String {
        let total: usize = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut out = String::with_capacity(total.saturating_sub(1));
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(line);
            if i < self.lines.len() - 1 {
                out.push('\n');
            }
        }
        out
    }

    /// Replace the whole buffer content and reset the cursor.
    ///
    /// This raises the changed flag just like a user edit would; callers
    /// that load content programmatically must drain it afterwards.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor = (0, 0);
        self.changed = true;
    }

    /// Consume the content-changed flag.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn insert_char(&mut self, c: char) {
        let (row, col) = self.cursor;
        let line = &mut self.lines[row];
        let byte = byte_index(line, col);
        line.insert(byte, c);
        self.cursor.1 += 1;
        self.changed = true;
    }

    pub fn insert_newline(&mut self) {
        let (row, col) = self.cursor;
        let byte = byte_index(&self.lines[row], col);
        let rest = self.lines[row].split_off(byte);
        self.lines.insert(row + 1, rest);
        self.cursor = (row + 1, 0);
        self.changed = true;
    }

    pub fn backspace(&mut self) {
        let (row, col) = self.cursor;
        if col > 0 {
            let line = &mut self.lines[row];
            let byte = byte_index(line, col - 1);
            line.remove(byte);
            self.cursor.1 -= 1;
            self.changed = true;
        } else if row > 0 {
            let current = self.lines.remove(row);
            let prev = &mut self.lines[row - 1];
            let join_col = prev.chars().count();
            prev.push_str(&current);
            self.cursor = (row - 1, join_col);
            self.changed = true;
        }
    }

    pub fn delete_forward(&mut self) {
        let (row, col) = self.cursor;
        let line_chars = self.lines[row].chars().count();
        if col < line_chars {
            let byte = byte_index(&self.lines[row], col);
            self.lines[row].remove(byte);
            self.changed = true;
        } else if row + 1 < self.lines.len() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
            self.changed = true;
        }
    }

    /// Move the cursor, clamping to line and buffer boundaries.
    pub fn move_cursor(&mut self, movement: CursorMovement) {
        let (mut row, mut col) = self.cursor;
        match movement {
            CursorMovement::Up => {
                if row > 0 {
                    row -= 1;
                    col = col.min(self.lines[row].chars().count());
                }
            }
            CursorMovement::Down => {
                if row + 1 < self.lines.len() {
                    row += 1;
                    col = col.min(self.lines[row].chars().count());
                }
            }
            CursorMovement::Left => {
                if col > 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = self.lines[row].chars().count();
                }
            }
            CursorMovement::Right => {
                if col < self.lines[row].chars().count() {
                    col += 1;
                } else if row + 1 < self.lines.len() {
                    row += 1;
                    col = 0;
                }
            }
            CursorMovement::LineStart => {
                col = 0;
            }
            CursorMovement::LineEnd => {
                col = self.lines[row].chars().count();
            }
            CursorMovement::PageUp => {
                row = row.saturating_sub(PAGE_SIZE);
                col = col.min(self.lines[row].chars().count());
            }
            CursorMovement::PageDown => {
                row = (row + PAGE_SIZE).min(self.lines.len() - 1);
                col = col.min(self.lines[row].chars().count());
            }
        }
        self.cursor = (row, col);
    }
}

// Fallback page size when the real viewport height is not known.
const PAGE_SIZE: usize = 8;

/// Byte offset of the `col`-th character of `line`.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
