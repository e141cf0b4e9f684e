//! Fire-and-forget output sinks for generated results.
//!
//! The text panel writes to a clipboard, the image panel saves to disk.
//! Neither feeds anything back into the lifecycle.

pub mod clipboard;
pub mod download;

pub use clipboard::{ClipboardSink, MemoryClipboard, Osc52Clipboard};
pub use download::{ExportError, ExportReceipt, HttpExporter, ImageExporter};
