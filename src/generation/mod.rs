//! Generation core. The request lifecycle shared by both studio panels.
//!
//! A panel owns one `Lifecycle<F>` per flavor. The flavor fixes the
//! request parameter type and the payload type; the transition logic is
//! written once and instantiated for `ImageFlavor` and `TextFlavor`.
//!
//! ## Lifecycle
//!
//! ```text
//!   Idle ──submit(ok)──► Pending ──complete(ok)──► Succeeded
//!    │                     │    └──complete(err)─► Failed
//!    └──submit(empty)──► Failed        ▲
//!                                      │ submit(ok) from any rest state
//! ```
//!
//! Completions carry the `Ticket` handed out by `submit`. Only the
//! ticket of the latest submission is honoured.

pub mod backend;
pub mod copy;
pub mod error;
pub mod image;
pub mod lifecycle;
pub mod panel;
pub mod templates;
pub mod text;

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

pub use backend::{GenerationBackend, MockImageBackend, MockTextBackend};
pub use copy::{CopyIndicator, CopyTicket};
pub use error::{GenerationError, GenerationOutcome};
pub use image::{ImageFlavor, ImageReference};
pub use lifecycle::{Lifecycle, LifecycleState, Submission, Ticket};
pub use panel::{Panel, PanelEvent};
pub use text::{ContentType, TextFlavor};

/// Payload types for one panel instantiation.
pub trait Flavor: fmt::Debug + Copy + Send + Sync + 'static {
    /// Flavor-specific request parameter (content type for text, none for images).
    type Params: Clone + fmt::Debug + Send + Sync + 'static;
    /// What a successful generation produces.
    type Output: Clone + fmt::Debug + Send + Sync + 'static;
    /// Name used in log fields.
    const NAME: &'static str;
}

/// A submitted prompt. Immutable once created; shared with the backend task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest<P> {
    pub id: Uuid,
    /// The prompt as the user typed it (validated non-empty after trim).
    pub prompt: String,
    pub params: P,
    /// Wall-clock submission time, milliseconds since the Unix epoch.
    pub submitted_at_ms: u64,
}

impl<P> GenerationRequest<P> {
    pub fn new(prompt: impl Into<String>, params: P) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            params,
            submitted_at_ms: now_millis(),
        }
    }
}

/// Output of a completed generation, bound to the request that produced it.
#[derive(Debug, Clone)]
pub struct GenerationResult<F: Flavor> {
    pub payload: F::Output,
    pub request: Arc<GenerationRequest<F::Params>>,
}

impl<F: Flavor> GenerationResult<F> {
    pub fn produced_from(&self) -> &GenerationRequest<F::Params> {
        &self.request
    }
}

/// Current time in milliseconds since Unix epoch.
pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
