use crate::shell::error::ShellError;
use crate::shell::{Shell, ShellState};

/// Operator action reported by a frontend to the run loop driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    /// Nothing happened within the poll window.
    None,
    NextTab,
    PrevTab,
    SelectTab(usize),
    ShowAbout,
    DismissDialog,
    /// Operator asked the shell to close.
    Close,
}

/// Seam between the orchestration core and a concrete UI toolkit.
///
/// The driver calls `initialize` once, then alternates `render` and
/// `poll_action` until an action closes the shell, then calls `finalize`
/// exactly once, even after a render failure. Implementations own their
/// toolkit state; the core owns the shell model.
pub trait ShellFrontend: Send {
    /// Unique name of the frontend, e.g. `terminal`.
    fn name(&self) -> &str;

    /// Set up the toolkit and claim the display surface.
    fn initialize(&mut self, shell: &Shell) -> Result<(), ShellError>;

    /// Draw the shell in its current state.
    fn render(&mut self, shell: &Shell, state: &ShellState) -> Result<(), ShellError>;

    /// Block briefly for operator input and translate it to an action.
    fn poll_action(&mut self) -> Result<ShellAction, ShellError>;

    /// Release the display surface.
    fn finalize(&mut self) -> Result<(), ShellError>;
}
