pub mod dialog;
pub mod editor;
pub mod toast;

pub use dialog::{AboutDialog, ConfirmDialog, PathPrompt, ShortcutsOverlay, GATE_CHOICES};
pub use editor::EditorView;
pub use toast::{Toast, ToastKind, ToastManager, ToastWidget};
