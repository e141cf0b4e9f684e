//! Terminal front end for the studio.
//!
//! ## Architecture (TEA)
//!
//! Model (`StudioApp`) + Update (message handler) + View (render).
//! Immediate mode: the view reads the two panels and the shell every
//! frame and holds no state of its own beyond the menu.

pub mod app;
pub mod dashboard;
pub mod event;
pub mod input;
pub mod layout;
pub mod markdown;
pub mod prompt;
pub mod runner;
pub mod theme;
