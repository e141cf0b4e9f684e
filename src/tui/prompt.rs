//! Prompt input. A plain-text `ratatui_code_editor` without line numbers.
//!
//! Editing keys go to the editor; the shell-style chords (Ctrl+W,
//! Ctrl+U, Ctrl+A, Ctrl+E) and Alt+Enter are resolved here first.
//! Cursor positions are char offsets.

use anyhow::anyhow;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui_code_editor::editor::Editor;
use tracing::debug;

pub struct PromptInput {
    editor: Editor,
    /// Area from the last render (the editor needs it to map keys).
    area: Rect,
}

impl PromptInput {
    pub fn new() -> anyhow::Result<Self> {
        let mut editor = Editor::new("text", "", vec![])
            .map_err(|e| anyhow!("cannot create prompt editor: {e}"))?;
        editor.show_line_numbers(false);
        Ok(Self {
            editor,
            area: Rect::new(0, 0, 80, 3),
        })
    }

    pub fn text(&self) -> String {
        self.editor.get_content()
    }

    pub fn cursor(&self) -> usize {
        self.editor.get_cursor()
    }

    pub fn is_empty(&self) -> bool {
        self.editor.get_content().is_empty()
    }

    /// Replace the content and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.editor.set_content(text);
        self.editor.set_cursor(text.chars().count());
    }

    pub fn clear(&mut self) {
        self.editor.set_content("");
        self.editor.set_cursor(0);
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        let chars: Vec<char> = self.editor.get_content().chars().collect();
        let cursor = self.editor.get_cursor().min(chars.len());
        let mut start = cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let kept: String = chars[..start].iter().chain(&chars[cursor..]).collect();
        self.editor.set_content(&kept);
        self.editor.set_cursor(start);
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let key = match key.code {
            KeyCode::Char('w') if ctrl => {
                self.delete_word();
                return true;
            }
            KeyCode::Char('u') if ctrl => {
                self.clear();
                return true;
            }
            KeyCode::Char('a') if ctrl => {
                self.editor.set_cursor(0);
                return true;
            }
            KeyCode::Char('e') if ctrl => {
                let end = self.editor.get_content().chars().count();
                self.editor.set_cursor(end);
                return true;
            }
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
            }
            KeyCode::Char(_)
            | KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End => key,
            _ => return false,
        };
        if let Err(e) = self.editor.input(key, &self.area) {
            debug!(error = %e, "prompt editor rejected key");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(s: &str) -> PromptInput {
        let mut p = PromptInput::new().unwrap();
        for c in s.chars() {
            p.handle_key(key(KeyCode::Char(c)));
        }
        p
    }

    #[test]
    fn typing_appends() {
        let p = typed("neon city");
        assert_eq!(p.text(), "neon city");
        assert_eq!(p.cursor(), 9);
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut p = typed("café");
        p.handle_key(key(KeyCode::Backspace));
        assert_eq!(p.text(), "caf");
    }

    #[test]
    fn ctrl_w_deletes_previous_word() {
        let mut p = typed("a sunset over dunes");
        assert!(p.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        assert_eq!(p.text(), "a sunset over ");
        assert_eq!(p.cursor(), 14);
    }

    #[test]
    fn ctrl_u_clears() {
        let mut p = typed("dunes");
        assert!(p.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(p.is_empty());
    }

    #[test]
    fn other_ctrl_chords_are_not_consumed() {
        let mut p = typed("x");
        assert!(!p.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)));
        assert_eq!(p.text(), "x");
    }

    #[test]
    fn alt_enter_inserts_newline() {
        let mut p = typed("a");
        assert!(p.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT)));
        assert!(p.text().starts_with("a\n"));
        assert!(!p.handle_key(key(KeyCode::Enter)));
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut p = PromptInput::new().unwrap();
        p.set_text("tea");
        assert_eq!(p.cursor(), 3);
        p.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        assert_eq!(p.cursor(), 0);
    }
}
