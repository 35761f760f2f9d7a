//! Shared helper functions for CLI commands.

use std::io;

use console::Term;

/// Whether the full-screen view can be used.
///
/// `NO_TUI` or `PLUTO_NO_TUI` forces plain output.
pub fn is_interactive() -> bool {
    if std::env::var("NO_TUI").is_ok() || std::env::var("PLUTO_NO_TUI").is_ok() {
        return false;
    }

    if !Term::stdout().is_term() {
        return false;
    }

    // Double-check with crossterm's detection (more reliable in some environments)
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        return false;
    }

    crossterm::terminal::size().is_ok()
}

/// Format a number with thousand separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();
    let chunks: Vec<_> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();
    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Truncate a string to `max_chars` characters with an ellipsis.
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
