// ============================================================================
// Interactive Shell
// ============================================================================
//
// Numbered text menu over the registry and the file collaborators. Generic
// over the reader/writer so sessions can be scripted.
//
// ============================================================================

mod menu;
mod prompt;

pub use menu::{benefit_line, Shell};
pub use prompt::{Prompter, ShellError};
