//! Keyboard dispatch: shortcuts and typing in the editor, plus the input
//! routing for whichever dialog is open. While a dialog is up every key
//! lands here first, so the shortcuts that could open a second dialog are
//! unreachable until it resolves.

use std::path::PathBuf;

use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Dialog};
use crate::session::{GateChoice, GateResolution, Request, SaveOutcome};
use crate::surface::CursorMovement;
use crate::widgets::GATE_CHOICES;

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return Ok(());
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => {
                self.running = false;
            }
            (KeyCode::Char('s') | KeyCode::Char('S'), m)
                if m.contains(KeyModifiers::CONTROL) && m.contains(KeyModifiers::SHIFT) =>
            {
                self.open_save_as_prompt();
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                self.save_document();
            }
            (KeyCode::Char('n'), KeyModifiers::CONTROL) => {
                self.request_new_document();
            }
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                self.dialog = Some(Dialog::OpenPrompt {
                    input: String::new(),
                });
            }
            (KeyCode::Char('z'), KeyModifiers::ALT) => {
                self.toggle_wrap();
            }
            (KeyCode::Char('=') | KeyCode::Char('+'), KeyModifiers::CONTROL) => {
                self.adjust_font_size(1);
            }
            (KeyCode::Char('-'), KeyModifiers::CONTROL) => {
                self.adjust_font_size(-1);
            }
            (KeyCode::F(1), _) => {
                self.dialog = Some(Dialog::Shortcuts);
            }
            (KeyCode::F(2), _) => {
                self.dialog = Some(Dialog::About);
            }
            (KeyCode::Enter, _) => {
                self.surface.insert_newline();
            }
            (KeyCode::Backspace, _) => {
                self.surface.backspace();
            }
            (KeyCode::Delete, _) => {
                self.surface.delete_forward();
            }
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.surface.insert_char('\t');
            }
            (KeyCode::Up, _) => self.surface.move_cursor(CursorMovement::Up),
            (KeyCode::Down, _) => self.surface.move_cursor(CursorMovement::Down),
            (KeyCode::Left, _) => self.surface.move_cursor(CursorMovement::Left),
            (KeyCode::Right, _) => self.surface.move_cursor(CursorMovement::Right),
            (KeyCode::Home, _) => self.surface.move_cursor(CursorMovement::LineStart),
            (KeyCode::End, _) => self.surface.move_cursor(CursorMovement::LineEnd),
            (KeyCode::PageUp, _) => self.surface.move_cursor(CursorMovement::PageUp),
            (KeyCode::PageDown, _) => self.surface.move_cursor(CursorMovement::PageDown),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.surface.insert_char(c);
            }
            _ => {}
        }

        if self.surface.take_changed() {
            self.session.mark_dirty();
        }

        Ok(())
    }

    /// Route a key to the open dialog.
    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match self.dialog.take() {
            Some(Dialog::Confirm { mut selected }) => match key.code {
                KeyCode::Left | KeyCode::BackTab => {
                    selected = (selected + GATE_CHOICES.len() - 1) % GATE_CHOICES.len();
                    self.dialog = Some(Dialog::Confirm { selected });
                }
                KeyCode::Right | KeyCode::Tab => {
                    selected = (selected + 1) % GATE_CHOICES.len();
                    self.dialog = Some(Dialog::Confirm { selected });
                }
                KeyCode::Enter => self.resolve_gate(GATE_CHOICES[selected]),
                KeyCode::Char('s') => self.resolve_gate(GateChoice::Save),
                KeyCode::Char('d') => self.resolve_gate(GateChoice::Discard),
                KeyCode::Char('c') | KeyCode::Esc => self.resolve_gate(GateChoice::Cancel),
                _ => {
                    self.dialog = Some(Dialog::Confirm { selected });
                }
            },
            Some(Dialog::OpenPrompt { mut input }) => match key.code {
                KeyCode::Enter => {
                    let path = input.trim().to_string();
                    if !path.is_empty() {
                        self.request_open(PathBuf::from(path));
                    }
                }
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    input.pop();
                    self.dialog = Some(Dialog::OpenPrompt { input });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.dialog = Some(Dialog::OpenPrompt { input });
                }
                _ => {
                    self.dialog = Some(Dialog::OpenPrompt { input });
                }
            },
            Some(Dialog::SaveAsPrompt { mut input }) => match key.code {
                KeyCode::Enter => {
                    let path = input.trim().to_string();
                    if path.is_empty() {
                        self.dialog = Some(Dialog::SaveAsPrompt { input });
                    } else {
                        self.save_document_as(PathBuf::from(path));
                    }
                }
                KeyCode::Esc => {
                    // Dismissing save-as also drops a continuation parked
                    // behind it by the gate's Save choice.
                    self.session.cancel_pending();
                }
                KeyCode::Backspace => {
                    input.pop();
                    self.dialog = Some(Dialog::SaveAsPrompt { input });
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    self.dialog = Some(Dialog::SaveAsPrompt { input });
                }
                _ => {
                    self.dialog = Some(Dialog::SaveAsPrompt { input });
                }
            },
            Some(overlay @ (Dialog::Shortcuts | Dialog::About)) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {}
                _ => self.dialog = Some(overlay),
            },
            None => {}
        }
    }

    /// New document, gated behind the unsaved-changes confirmation.
    pub fn request_new_document(&mut self) {
        if let Request::Confirm = self.session.request_new(&mut self.surface) {
            self.dialog = Some(Dialog::Confirm { selected: 0 });
        }
    }

    /// Open `path`, gated behind the unsaved-changes confirmation. The file
    /// is not read until the gate resolves.
    pub fn request_open(&mut self, path: PathBuf) {
        match self.session.request_open(&mut self.surface, path.clone()) {
            Ok(Request::Done) => {
                self.toasts.success(format!("Opened {}", path.display()));
            }
            Ok(Request::Confirm) => {
                self.dialog = Some(Dialog::Confirm { selected: 0 });
            }
            Err(e) => {
                self.toasts
                    .error(format!("Error opening {}: {}", path.display(), e));
            }
        }
    }

    /// Save to the backing path, falling through to save-as when there is
    /// none.
    pub fn save_document(&mut self) {
        match self.session.save(&self.surface) {
            Ok(SaveOutcome::Saved(path)) => {
                self.toasts.success(format!("Saved {}", path.display()));
            }
            Ok(SaveOutcome::NeedsPath) => self.open_save_as_prompt(),
            Err(e) => {
                self.toasts.error(format!("Error saving file: {}", e));
            }
        }
    }

    pub fn open_save_as_prompt(&mut self) {
        let input = self
            .session
            .backing_path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.dialog = Some(Dialog::SaveAsPrompt { input });
    }

    /// Save-as to `path`, then run any continuation the gate parked behind
    /// the save.
    pub fn save_document_as(&mut self, path: PathBuf) {
        match self.session.save_as(&self.surface, path.clone()) {
            Ok(()) => {
                self.toasts.success(format!("Saved {}", path.display()));
                if self.session.has_pending() {
                    if let Err(e) = self.session.run_pending(&mut self.surface) {
                        self.toasts.error(format!("Error opening file: {}", e));
                    }
                }
            }
            Err(e) => {
                self.session.cancel_pending();
                self.toasts
                    .error(format!("Error saving {}: {}", path.display(), e));
            }
        }
    }

    /// Apply a gate choice to the session and follow up in the UI.
    pub fn resolve_gate(&mut self, choice: GateChoice) {
        if matches!(self.dialog, Some(Dialog::Confirm { .. })) {
            self.dialog = None;
        }
        match self.session.resolve_gate(choice, &mut self.surface) {
            Ok(GateResolution::Done) | Ok(GateResolution::Cancelled) => {}
            Ok(GateResolution::NeedsPath) => self.open_save_as_prompt(),
            Err(e) => {
                self.toasts.error(format!("Error saving file: {}", e));
            }
        }
    }
}
