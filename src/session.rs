//! # Document Session
//!
//! The state machine behind the window: the association between the buffer
//! content and a backing file (or none, for a never-saved document), the
//! dirty flag, and the orchestration of new/open/save flows including the
//! unsaved-changes confirmation gate.
//!
//! The session reads and writes content through a [`Surface`] but does not
//! store a copy of it. File I/O is synchronous and inline; failures never
//! advance session state.

use std::io;
use std::path::{Path, PathBuf};

use crate::surface::Surface;

/// Title shown for a never-saved document.
pub const UNTITLED_LABEL: &str = "texty2";

/// Prefix marking unsaved changes in the window title.
pub const DIRTY_MARKER: &str = "* ";

/// The single continuation a confirmation gate can hold.
///
/// Any other continuation is unrepresentable; the gate cannot be resolved
/// into an unknown operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    New,
    Open(PathBuf),
}

/// The three-way choice offered by the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateChoice {
    Save,
    Discard,
    Cancel,
}

/// Outcome of requesting a destructive operation.
#[derive(Debug, PartialEq)]
pub enum Request {
    /// The operation ran immediately.
    Done,
    /// The document is dirty; the operation is parked until the gate resolves.
    Confirm,
}

/// Outcome of a save attempt.
#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No backing path; the caller must prompt for a destination.
    NeedsPath,
}

/// Outcome of resolving the confirmation gate.
#[derive(Debug, PartialEq)]
pub enum GateResolution {
    /// The pending operation completed.
    Done,
    /// Save was chosen but the document has no backing path; the pending
    /// operation stays parked until a save-as completes.
    NeedsPath,
    Cancelled,
}

pub struct DocumentSession {
    backing_path: Option<PathBuf>,
    dirty: bool,
    pending: Option<PendingAction>,
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentSession {
    pub fn new() -> Self {
        Self {
            backing_path: None,
            dirty: false,
            pending: None,
        }
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Content-changed notification from the surface.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Derived window title: backing file basename or the untitled label,
    /// with the dirty marker prefixed while there are unsaved changes.
    pub fn title(&self) -> String {
        let name = self
            .backing_path
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or(UNTITLED_LABEL);
        decorate_title(name, self.dirty)
    }

    /// Reset to an empty, unsaved document.
    pub fn new_document(&mut self, surface: &mut Surface) {
        surface.set_text("");
        // set_text flags a change like any edit; clear it so the fresh
        // document starts clean.
        surface.take_changed();
        self.backing_path = None;
        self.dirty = false;
    }

    /// Load `path` into the surface and adopt it as the backing path.
    /// On read failure nothing changes.
    pub fn open(&mut self, surface: &mut Surface, path: PathBuf) -> io::Result<()> {
        let content = std::fs::read_to_string(&path)?;
        surface.set_text(&content);
        surface.take_changed();
        self.backing_path = Some(path);
        self.dirty = false;
        Ok(())
    }

    /// Write the surface content to the backing path, if there is one.
    ///
    /// A missing path is not an error; the caller gets [`SaveOutcome::NeedsPath`]
    /// and falls through to save-as. On write failure the session stays dirty.
    pub fn save(&mut self, surface: &Surface) -> io::Result<SaveOutcome> {
        match &self.backing_path {
            Some(path) => {
                std::fs::write(path, surface.text())?;
                self.dirty = false;
                Ok(SaveOutcome::Saved(path.clone()))
            }
            None => Ok(SaveOutcome::NeedsPath),
        }
    }

    /// Write the surface content to `path` and adopt it as the backing path.
    /// The path is adopted only after the write succeeds.
    pub fn save_as(&mut self, surface: &Surface, path: PathBuf) -> io::Result<()> {
        std::fs::write(&path, surface.text())?;
        self.backing_path = Some(path);
        self.dirty = false;
        Ok(())
    }

    /// Request a new document; gated behind confirmation when dirty.
    pub fn request_new(&mut self, surface: &mut Surface) -> Request {
        if self.dirty {
            self.pending = Some(PendingAction::New);
            Request::Confirm
        } else {
            self.new_document(surface);
            Request::Done
        }
    }

    /// Request opening `path`; gated behind confirmation when dirty.
    /// The file is not read until the gate resolves.
    pub fn request_open(&mut self, surface: &mut Surface, path: PathBuf) -> io::Result<Request> {
        if self.dirty {
            self.pending = Some(PendingAction::Open(path));
            Ok(Request::Confirm)
        } else {
            self.open(surface, path)?;
            Ok(Request::Done)
        }
    }

    /// Resolve the confirmation gate.
    ///
    /// `Cancel` drops the continuation and leaves everything untouched.
    /// `Discard` runs the continuation without saving. `Save` saves first
    /// and only runs the continuation on success; a save failure drops the
    /// continuation and the session stays dirty, so the user must reissue
    /// the operation.
    pub fn resolve_gate(
        &mut self,
        choice: GateChoice,
        surface: &mut Surface,
    ) -> io::Result<GateResolution> {
        debug_assert!(
            self.pending.is_some(),
            "confirmation gate resolved with no pending operation"
        );
        match choice {
            GateChoice::Cancel => {
                self.pending = None;
                Ok(GateResolution::Cancelled)
            }
            GateChoice::Discard => {
                self.run_pending(surface)?;
                Ok(GateResolution::Done)
            }
            GateChoice::Save => match self.save(surface) {
                Ok(SaveOutcome::Saved(_)) => {
                    self.run_pending(surface)?;
                    Ok(GateResolution::Done)
                }
                Ok(SaveOutcome::NeedsPath) => Ok(GateResolution::NeedsPath),
                Err(e) => {
                    self.pending = None;
                    Err(e)
                }
            },
        }
    }

    /// Execute and clear the pending continuation. A no-op when nothing is
    /// pending. The continuation is consumed even when it fails, so a
    /// failed open does not linger.
    pub fn run_pending(&mut self, surface: &mut Surface) -> io::Result<()> {
        match self.pending.take() {
            Some(PendingAction::New) => {
                self.new_document(surface);
                Ok(())
            }
            Some(PendingAction::Open(path)) => self.open(surface, path),
            None => Ok(()),
        }
    }

    /// Drop the pending continuation without running it.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }
}

/// Apply or remove the dirty marker on a title. Idempotent: a title that
/// already carries the marker is never marked twice.
pub fn decorate_title(title: &str, dirty: bool) -> String {
    let base = title.strip_prefix(DIRTY_MARKER).unwrap_or(title);
    if dirty {
        format!("{DIRTY_MARKER}{base}")
    } else {
        base.to_string()
    }
}
