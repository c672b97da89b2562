//! Integration tests for the text surface
//!
//! Tests the editing primitives and the content-changed notification that
//! drives the session's dirty flag.

use texty2::surface::{CursorMovement, Surface};

#[test]
fn test_surface_creation() {
    let surface = Surface::new();

    assert_eq!(surface.line_count(), 1);
    assert_eq!(surface.cursor, (0, 0));
    assert_eq!(surface.text(), "");
}

#[test]
fn test_text_insertion() {
    let mut surface = Surface::new();

    for c in "Hello".chars() {
        surface.insert_char(c);
    }

    assert_eq!(surface.text(), "Hello");
    assert_eq!(surface.cursor, (0, 5));
    assert!(surface.take_changed());
    assert!(!surface.take_changed());
}

#[test]
fn test_newline_insertion() {
    let mut surface = Surface::new();

    for c in "Hi".chars() {
        surface.insert_char(c);
    }
    surface.insert_newline();
    for c in "Bye".chars() {
        surface.insert_char(c);
    }

    assert_eq!(surface.line_count(), 2);
    assert_eq!(surface.text(), "Hi\nBye");
    assert_eq!(surface.cursor, (1, 3));
}

#[test]
fn test_newline_splits_line_at_cursor() {
    let mut surface = Surface::new();
    surface.set_text("hello world");
    surface.cursor = (0, 5);

    surface.insert_newline();

    assert_eq!(surface.text(), "hello\n world");
    assert_eq!(surface.cursor, (1, 0));
}

#[test]
fn test_backspace() {
    let mut surface = Surface::new();
    for c in "Hello".chars() {
        surface.insert_char(c);
    }

    surface.backspace();
    surface.backspace();

    assert_eq!(surface.text(), "Hel");
    assert_eq!(surface.cursor, (0, 3));
}

#[test]
fn test_backspace_joins_lines() {
    let mut surface = Surface::new();
    surface.set_text("ab\ncd");
    surface.cursor = (1, 0);

    surface.backspace();

    assert_eq!(surface.text(), "abcd");
    assert_eq!(surface.cursor, (0, 2));
}

#[test]
fn test_delete_forward() {
    let mut surface = Surface::new();
    surface.set_text("ab\ncd");
    surface.cursor = (0, 2);

    surface.delete_forward();
    assert_eq!(surface.text(), "abcd");

    surface.cursor = (0, 0);
    surface.delete_forward();
    assert_eq!(surface.text(), "bcd");
}

#[test]
fn test_cursor_boundaries() {
    let mut surface = Surface::new();

    surface.move_cursor(CursorMovement::Left);
    assert_eq!(surface.cursor, (0, 0));
    surface.move_cursor(CursorMovement::Up);
    assert_eq!(surface.cursor, (0, 0));

    surface.insert_char('H');
    surface.insert_char('i');
    surface.cursor = (0, 0);

    surface.move_cursor(CursorMovement::Right);
    surface.move_cursor(CursorMovement::Right);
    surface.move_cursor(CursorMovement::Right);
    assert_eq!(surface.cursor, (0, 2));
}

#[test]
fn test_cursor_wraps_across_lines() {
    let mut surface = Surface::new();
    surface.set_text("ab\ncd");

    surface.cursor = (0, 2);
    surface.move_cursor(CursorMovement::Right);
    assert_eq!(surface.cursor, (1, 0));

    surface.move_cursor(CursorMovement::Left);
    assert_eq!(surface.cursor, (0, 2));
}

#[test]
fn test_cursor_clamps_to_shorter_line() {
    let mut surface = Surface::new();
    surface.set_text("long line\nab");

    surface.cursor = (0, 9);
    surface.move_cursor(CursorMovement::Down);
    assert_eq!(surface.cursor, (1, 2));
}

#[test]
fn test_line_start_and_end() {
    let mut surface = Surface::new();
    surface.set_text("hello");
    surface.cursor = (0, 3);

    surface.move_cursor(CursorMovement::LineEnd);
    assert_eq!(surface.cursor, (0, 5));

    surface.move_cursor(CursorMovement::LineStart);
    assert_eq!(surface.cursor, (0, 0));
}

#[test]
fn test_set_text_raises_changed_flag() {
    let mut surface = Surface::new();
    surface.take_changed();

    surface.set_text("programmatic");

    // Programmatic set_text notifies like a user edit.
    assert!(surface.take_changed());
    assert_eq!(surface.text(), "programmatic");
    assert_eq!(surface.cursor, (0, 0));
}

#[test]
fn test_text_roundtrip_preserves_newlines() {
    let mut surface = Surface::new();
    let content = "one\n\ntwo\n";

    surface.set_text(content);

    assert_eq!(surface.line_count(), 4);
    assert_eq!(surface.text(), content);
}

#[test]
fn test_multibyte_editing() {
    let mut surface = Surface::new();
    for c in "héllo".chars() {
        surface.insert_char(c);
    }
    assert_eq!(surface.text(), "héllo");

    surface.backspace();
    surface.backspace();
    assert_eq!(surface.text(), "hél");

    surface.cursor = (0, 1);
    surface.delete_forward();
    assert_eq!(surface.text(), "hl");
}
