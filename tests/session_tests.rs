//! Integration tests for the document session state machine
//!
//! Covers the dirty/clean lifecycle, the unsaved-changes confirmation gate
//! and title derivation.

use std::fs;
use tempfile::TempDir;

use texty2::session::{
    decorate_title, DocumentSession, GateChoice, GateResolution, Request, SaveOutcome,
};
use texty2::surface::Surface;

fn type_text(surface: &mut Surface, session: &mut DocumentSession, text: &str) {
    for c in text.chars() {
        surface.insert_char(c);
    }
    if surface.take_changed() {
        session.mark_dirty();
    }
}

#[test]
fn test_session_initial_state() {
    let session = DocumentSession::new();

    assert!(!session.is_dirty());
    assert!(session.backing_path().is_none());
    assert!(!session.has_pending());
    assert_eq!(session.title(), "texty2");
}

#[test]
fn test_dirty_after_mutation() {
    let mut surface = Surface::new();
    let mut session = DocumentSession::new();

    type_text(&mut surface, &mut session, "hello");

    assert!(session.is_dirty());
    assert_eq!(session.title(), "* texty2");
}

#[test]
fn test_new_when_clean_needs_no_gate() {
    let mut surface = Surface::new();
    let mut session = DocumentSession::new();

    assert_eq!(session.request_new(&mut surface), Request::Done);
    assert!(!session.is_dirty());
    assert!(session.backing_path().is_none());
    assert_eq!(surface.text(), "");
}

#[test]
fn test_new_when_dirty_invokes_gate_without_mutating() {
    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "hello");

    assert_eq!(session.request_new(&mut surface), Request::Confirm);

    // Nothing moved until the gate resolves.
    assert!(session.has_pending());
    assert!(session.is_dirty());
    assert_eq!(surface.text(), "hello");
}

#[test]
fn test_gate_cancel_leaves_everything_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let other = temp_dir.path().join("other.txt");
    fs::write(&other, "other content").unwrap();

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "hello");

    assert_eq!(
        session.request_open(&mut surface, other.clone()).unwrap(),
        Request::Confirm
    );
    let resolution = session
        .resolve_gate(GateChoice::Cancel, &mut surface)
        .unwrap();

    assert_eq!(resolution, GateResolution::Cancelled);
    assert!(session.is_dirty());
    assert!(!session.has_pending());
    assert_eq!(surface.text(), "hello");
    assert!(session.backing_path().is_none());
}

#[test]
fn test_gate_discard_runs_pending_without_saving() {
    let temp_dir = TempDir::new().unwrap();
    let other = temp_dir.path().join("other.txt");
    fs::write(&other, "other content").unwrap();

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "unsaved");

    session.request_open(&mut surface, other.clone()).unwrap();
    let resolution = session
        .resolve_gate(GateChoice::Discard, &mut surface)
        .unwrap();

    assert_eq!(resolution, GateResolution::Done);
    assert_eq!(surface.text(), "other content");
    assert_eq!(session.backing_path(), Some(other.as_path()));
    assert!(!session.is_dirty());

    // Nothing was written anywhere; the typed text is gone.
    assert_eq!(fs::read_to_string(&other).unwrap(), "other content");
}

#[test]
fn test_gate_save_writes_then_runs_pending() {
    let temp_dir = TempDir::new().unwrap();
    let backing = temp_dir.path().join("doc.txt");
    fs::write(&backing, "").unwrap();

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    session.open(&mut surface, backing.clone()).unwrap();
    type_text(&mut surface, &mut session, "edited");

    assert_eq!(session.request_new(&mut surface), Request::Confirm);
    let resolution = session.resolve_gate(GateChoice::Save, &mut surface).unwrap();

    assert_eq!(resolution, GateResolution::Done);
    assert_eq!(fs::read_to_string(&backing).unwrap(), "edited");
    // The pending "new" ran: empty unsaved document.
    assert_eq!(surface.text(), "");
    assert!(session.backing_path().is_none());
    assert!(!session.is_dirty());
}

#[test]
fn test_gate_save_without_path_keeps_pending() {
    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "hello");

    assert_eq!(session.request_new(&mut surface), Request::Confirm);
    let resolution = session.resolve_gate(GateChoice::Save, &mut surface).unwrap();

    // No backing path; the continuation stays parked for after save-as.
    assert_eq!(resolution, GateResolution::NeedsPath);
    assert!(session.has_pending());
    assert!(session.is_dirty());
    assert_eq!(surface.text(), "hello");
}

#[test]
fn test_gate_save_failure_keeps_session_dirty() {
    let temp_dir = TempDir::new().unwrap();
    let backing = temp_dir.path().join("doc.txt");
    fs::write(&backing, "content").unwrap();

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    session.open(&mut surface, backing.clone()).unwrap();
    type_text(&mut surface, &mut session, "!");

    // Make the backing path unwritable by turning it into a directory.
    fs::remove_file(&backing).unwrap();
    fs::create_dir(&backing).unwrap();

    session.request_new(&mut surface);
    let result = session.resolve_gate(GateChoice::Save, &mut surface);

    assert!(result.is_err());
    assert!(session.is_dirty());
    assert_eq!(session.backing_path(), Some(backing.as_path()));
    // The pending operation did not proceed; content is untouched.
    assert_eq!(surface.text(), "!content");
    assert!(!session.has_pending());
}

#[test]
fn test_save_without_path_falls_through_to_save_as() {
    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "text");

    assert_eq!(session.save(&surface).unwrap(), SaveOutcome::NeedsPath);
    assert!(session.is_dirty());
}

#[test]
fn test_save_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roundtrip.txt");

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    surface.set_text("line one\nline two\n");
    surface.take_changed();
    session.mark_dirty();

    session.save_as(&surface, path.clone()).unwrap();

    let mut surface2 = Surface::new();
    let mut session2 = DocumentSession::new();
    session2.open(&mut surface2, path).unwrap();

    assert_eq!(surface2.text(), "line one\nline two\n");
    assert!(!session2.is_dirty());
}

#[test]
fn test_save_as_failure_adopts_nothing() {
    let temp_dir = TempDir::new().unwrap();
    // Parent directory does not exist, so the write fails.
    let bad = temp_dir.path().join("missing").join("doc.txt");

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "text");

    assert!(session.save_as(&surface, bad).is_err());
    assert!(session.is_dirty());
    assert!(session.backing_path().is_none());
}

#[test]
fn test_open_failure_leaves_session_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.txt");

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    type_text(&mut surface, &mut session, "kept");

    assert!(session.open(&mut surface, missing).is_err());
    assert_eq!(surface.text(), "kept");
    assert!(session.is_dirty());
    assert!(session.backing_path().is_none());
}

#[test]
fn test_title_marker_idempotent() {
    let marked = decorate_title("texty2", true);
    let remarked = decorate_title(&marked, true);

    assert_eq!(marked, "* texty2");
    assert_eq!(remarked, "* texty2");
    assert_eq!(decorate_title(&remarked, false), "texty2");
}

#[test]
fn test_edit_save_edit_save_scenario() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a.txt");

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();

    type_text(&mut surface, &mut session, "hello");
    assert!(session.is_dirty());
    assert_eq!(session.title(), "* texty2");

    session.save_as(&surface, path.clone()).unwrap();
    assert!(!session.is_dirty());
    assert_eq!(session.backing_path(), Some(path.as_path()));
    assert_eq!(session.title(), "a.txt");

    type_text(&mut surface, &mut session, " world");
    assert!(session.is_dirty());
    assert_eq!(session.title(), "* a.txt");

    assert_eq!(
        session.save(&surface).unwrap(),
        SaveOutcome::Saved(path.clone())
    );
    assert!(!session.is_dirty());
    assert_eq!(session.title(), "a.txt");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello world");
}

#[test]
fn test_load_does_not_leave_document_dirty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("doc.txt");
    fs::write(&path, "content").unwrap();

    let mut surface = Surface::new();
    let mut session = DocumentSession::new();
    session.open(&mut surface, path).unwrap();

    // set_text flagged a change, but the session drained it.
    assert!(!surface.take_changed());
    assert!(!session.is_dirty());
}
