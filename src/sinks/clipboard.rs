//! Clipboard sinks.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;

/// Somewhere copied text can be sent.
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> io::Result<()>;
}

/// System clipboard via the OSC 52 terminal escape.
///
/// Works over SSH and inside tmux (with `set-clipboard on`). Terminals
/// that ignore OSC 52 drop the write silently.
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Clipboard;

impl ClipboardSink for Osc52Clipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        let mut out = io::stdout();
        execute!(out, CopyToClipboard::to_clipboard_from(text))?;
        out.flush()
    }
}

/// In-process clipboard that records every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent write, if any.
    pub fn contents(&self) -> Option<String> {
        self.writes.lock().ok()?.last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&self, text: &str) -> io::Result<()> {
        self.writes
            .lock()
            .map_err(|_| io::Error::other("clipboard lock poisoned"))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_keeps_last_write() {
        let clip = MemoryClipboard::new();
        assert!(clip.contents().is_none());
        clip.write_text("one").unwrap();
        clip.write_text("two").unwrap();
        assert_eq!(clip.contents().as_deref(), Some("two"));
        assert_eq!(clip.write_count(), 2);
    }
}
