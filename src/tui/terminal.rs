//! Terminal setup and teardown.
//!
//! Raw mode and the alternate screen are undone by [`TerminalGuard`] on every
//! exit path, including early setup failures and panics.

use std::io::{self, Write};
use std::sync::Once;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Leave the alternate screen, show the cursor and drop raw mode.
///
/// Every step is attempted even if an earlier one fails.
///
/// # Errors
/// Returns the first error encountered.
pub fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, Show);
    raw.and(screen)
}

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be switched; whatever was already
    /// changed is restored first.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore(&mut io::stdout()) {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Restore the terminal before the default panic message is printed.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore(&mut io::stdout());
            previous(info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_leaves_alternate_screen() {
        let mut out = Vec::new();
        // Raw mode was never enabled here, so only the escape sequences matter.
        let _ = restore(&mut out);
        let written = String::from_utf8(out).expect("utf8");
        assert!(written.contains("\x1b[?1049l"), "got {written:?}");
        assert!(written.contains("\x1b[?25h"), "got {written:?}");
    }
}
