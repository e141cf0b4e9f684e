//! TUI event loop messages.
//!
//! The runner multiplexes:
//! - crossterm keyboard events (forwarded from a blocking reader task)
//! - image and text panel events (generation completions, timers, exports)
//! - tick interval (10Hz, spinner animation)
//! - render interval (30fps, draw frame)
//!
//! Everything that changes app state arrives as a TuiMessage.

use crossterm::event::KeyEvent;

use crate::generation::{ImageFlavor, PanelEvent, TextFlavor};

/// Messages that drive the TUI update loop.
#[derive(Debug)]
pub enum TuiMessage {
    /// Keyboard input.
    Input(KeyEvent),
    /// Event from the image panel.
    Image(PanelEvent<ImageFlavor>),
    /// Event from the text panel.
    Text(PanelEvent<TextFlavor>),
    /// Tick: advance animations.
    Tick,
    /// Quit the TUI.
    Quit,
}
