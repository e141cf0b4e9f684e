//! AI Creative Studio: image and text generation playground.
//!
//! Two mocked generators share one lifecycle state machine
//! (`generation`). The `shell` owns the active tab and the persisted
//! dark mode preference. `tui` is the terminal presentation.

pub mod config;
pub mod generation;
pub mod shell;
pub mod sinks;
pub mod storage;
pub mod tui;
