//! Generation panel. A lifecycle wired to a backend.
//!
//! `submit` runs the backend on a tokio task and reports back through
//! the panel's event channel. The owner drains that channel and feeds
//! events to `handle_event`. A newer submission aborts the previous
//! task; the ticket check in the lifecycle still drops any completion
//! that was already queued.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::sinks::{ClipboardSink, ExportReceipt, ImageExporter};

use super::backend::GenerationBackend;
use super::copy::{CopyIndicator, CopyTicket};
use super::error::{GenerationError, GenerationOutcome};
use super::image::{download_filename, ImageFlavor};
use super::lifecycle::{Lifecycle, Ticket};
use super::text::TextFlavor;
use super::Flavor;

/// Asynchronous notifications for a panel.
#[derive(Debug)]
pub enum PanelEvent<F: Flavor> {
    /// A backend task finished.
    Completed {
        ticket: Ticket,
        outcome: GenerationOutcome<F::Output>,
    },
    /// The copy indicator's display interval ran out.
    CopyExpired(CopyTicket),
    /// An export finished (or failed).
    Exported(Result<ExportReceipt, String>),
}

/// What applying an event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelUpdate {
    /// Event was stale; nothing changed.
    Ignored,
    Settled,
    CopyCleared,
    Exported(Result<ExportReceipt, String>),
}

pub type PanelReceiver<F> = mpsc::UnboundedReceiver<PanelEvent<F>>;

pub struct Panel<F: Flavor> {
    lifecycle: Lifecycle<F>,
    backend: Arc<dyn GenerationBackend<F>>,
    events: mpsc::UnboundedSender<PanelEvent<F>>,
    in_flight: Option<AbortHandle>,
    copy: CopyIndicator,
}

impl<F: Flavor> Panel<F> {
    /// Create a panel and the receiver its events arrive on.
    pub fn new(backend: Arc<dyn GenerationBackend<F>>) -> (Self, PanelReceiver<F>) {
        Self::with_copy_indicator(backend, CopyIndicator::default())
    }

    pub fn with_copy_indicator(
        backend: Arc<dyn GenerationBackend<F>>,
        copy: CopyIndicator,
    ) -> (Self, PanelReceiver<F>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let panel = Self {
            lifecycle: Lifecycle::new(),
            backend,
            events: tx,
            in_flight: None,
            copy,
        };
        (panel, rx)
    }

    /// Validate and start a generation. Must be called inside a tokio runtime.
    pub fn submit(&mut self, prompt: &str, params: F::Params) -> Result<Ticket, GenerationError> {
        let submission = self.lifecycle.submit(prompt, params)?;

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
            debug!(flavor = F::NAME, "aborted superseded generation task");
        }

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        let ticket = submission.ticket;
        let handle = tokio::spawn(async move {
            let outcome = backend.generate(&submission.request).await;
            if events.send(PanelEvent::Completed { ticket, outcome }).is_err() {
                debug!(flavor = F::NAME, "panel dropped before completion");
            }
        });
        self.in_flight = Some(handle.abort_handle());
        Ok(ticket)
    }

    /// Apply an event from this panel's channel.
    pub fn handle_event(&mut self, event: PanelEvent<F>) -> PanelUpdate {
        match event {
            PanelEvent::Completed { ticket, outcome } => {
                if let Err(e) = &outcome {
                    warn!(flavor = F::NAME, seq = ticket.seq(), error = %e, "generation failed");
                }
                if self.lifecycle.complete(ticket, outcome) {
                    self.in_flight = None;
                    PanelUpdate::Settled
                } else {
                    PanelUpdate::Ignored
                }
            }
            PanelEvent::CopyExpired(ticket) => {
                if self.copy.expire(ticket) {
                    PanelUpdate::CopyCleared
                } else {
                    PanelUpdate::Ignored
                }
            }
            PanelEvent::Exported(outcome) => PanelUpdate::Exported(outcome),
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle<F> {
        &self.lifecycle
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    pub fn is_copied(&self) -> bool {
        self.copy.is_copied()
    }
}

impl Panel<TextFlavor> {
    /// Copy the current text to `clipboard` and flash the indicator.
    /// Returns false when there is nothing to copy.
    pub fn copy_result(&mut self, clipboard: &dyn ClipboardSink) -> bool {
        let Some(result) = self.lifecycle.result() else {
            return false;
        };
        if let Err(e) = clipboard.write_text(&result.payload) {
            warn!(error = %e, "clipboard write failed");
        }

        let ticket = self.copy.mark();
        let display = self.copy.display();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            let _ = events.send(PanelEvent::CopyExpired(ticket));
        });
        true
    }
}

impl Panel<ImageFlavor> {
    /// Save the current image through `exporter`. The outcome arrives as
    /// `PanelEvent::Exported`. Returns false when there is no image.
    pub fn export_result(&self, exporter: Arc<dyn ImageExporter>) -> bool {
        let Some(result) = self.lifecycle.result() else {
            return false;
        };
        let image = result.payload.clone();
        let filename = download_filename(super::now_millis());
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = exporter
                .export(&image, &filename)
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(PanelEvent::Exported(outcome));
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::generation::backend::{MockImageBackend, MockTextBackend};
    use crate::generation::image::ImageReference;
    use crate::generation::lifecycle::LifecycleState;
    use crate::generation::templates;
    use crate::generation::text::ContentType;
    use crate::generation::GenerationRequest;
    use crate::sinks::{ExportError, MemoryClipboard};

    fn text_panel() -> (Panel<TextFlavor>, PanelReceiver<TextFlavor>) {
        Panel::new(Arc::new(MockTextBackend::new(Duration::from_millis(2000))))
    }

    async fn settle<F: Flavor>(panel: &mut Panel<F>, rx: &mut PanelReceiver<F>) -> PanelUpdate {
        let event = rx.recv().await.expect("panel channel closed");
        panel.handle_event(event)
    }

    #[tokio::test(start_paused = true)]
    async fn submit_then_complete_after_latency() {
        let (mut panel, mut rx) = text_panel();
        panel.submit("love", ContentType::Poem).unwrap();
        assert_eq!(panel.lifecycle().state(), LifecycleState::Pending);

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(settle(&mut panel, &mut rx).await, PanelUpdate::Settled);
        let lc = panel.lifecycle();
        assert_eq!(lc.state(), LifecycleState::Succeeded);
        let result = lc.result().unwrap();
        assert_eq!(result.produced_from().prompt, "love");
        assert_eq!(result.payload, templates::render(ContentType::Poem, "love"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_prompt_spawns_nothing() {
        let (mut panel, mut rx) = text_panel();
        assert_eq!(
            panel.submit("   ", ContentType::Blog),
            Err(GenerationError::EmptyPrompt)
        );
        assert_eq!(panel.lifecycle().state(), LifecycleState::Failed);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn second_submit_supersedes_first() {
        let (mut panel, mut rx) = text_panel();
        panel.submit("p1", ContentType::Story).unwrap();
        tokio::time::sleep(Duration::from_millis(1000)).await;
        panel.submit("p2", ContentType::Story).unwrap();

        assert_eq!(settle(&mut panel, &mut rx).await, PanelUpdate::Settled);
        let result = panel.lifecycle().result().unwrap();
        assert_eq!(result.produced_from().prompt, "p2");
        assert!(result.payload.contains("p2"));
        assert!(!result.payload.contains("p1"));

        tokio::time::sleep(Duration::from_secs(5)).await;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(panel.handle_event(event), PanelUpdate::Ignored);
        }
        assert_eq!(panel.lifecycle().result().unwrap().produced_from().prompt, "p2");
    }

    struct FailingBackend;

    #[async_trait]
    impl GenerationBackend<TextFlavor> for FailingBackend {
        async fn generate(&self, _request: &GenerationRequest<ContentType>) -> GenerationOutcome<String> {
            Err(GenerationError::GenerationFailed("model offline".into()))
        }
    }

    #[tokio::test]
    async fn backend_failure_leaves_panel_usable() {
        let (mut panel, mut rx) = Panel::<TextFlavor>::new(Arc::new(FailingBackend));
        panel.submit("x", ContentType::Blog).unwrap();
        settle(&mut panel, &mut rx).await;
        assert_eq!(panel.lifecycle().state(), LifecycleState::Failed);
        assert_eq!(
            panel.lifecycle().error(),
            Some(&GenerationError::GenerationFailed("model offline".into()))
        );
        assert!(panel.submit("again", ContentType::Blog).is_ok());
        assert!(panel.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn copy_without_result_is_noop() {
        let (mut panel, _rx) = text_panel();
        let clip = MemoryClipboard::new();
        assert!(!panel.copy_result(&clip));
        assert!(!panel.is_copied());
        assert_eq!(clip.write_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn copy_flag_resets_after_last_copy() {
        let (mut panel, mut rx) = text_panel();
        panel.submit("tea", ContentType::Email).unwrap();
        settle(&mut panel, &mut rx).await;

        let clip = MemoryClipboard::new();
        assert!(panel.copy_result(&clip));
        assert!(panel.is_copied());
        assert_eq!(clip.contents().unwrap(), templates::render(ContentType::Email, "tea"));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(panel.copy_result(&clip));

        // First timer belongs to the older copy.
        assert_eq!(settle(&mut panel, &mut rx).await, PanelUpdate::Ignored);
        assert!(panel.is_copied());

        // Second timer clears the flag.
        assert_eq!(settle(&mut panel, &mut rx).await, PanelUpdate::CopyCleared);
        assert!(!panel.is_copied());
    }

    struct RecordingExporter;

    #[async_trait]
    impl ImageExporter for RecordingExporter {
        async fn export(&self, image: &ImageReference, filename: &str) -> Result<ExportReceipt, ExportError> {
            assert!(filename.starts_with("ai-generated-"));
            assert!(filename.ends_with(".png"));
            Ok(ExportReceipt {
                path: PathBuf::from(filename),
                bytes: image.url.len(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn export_requires_result() {
        let (mut panel, mut rx) =
            Panel::<ImageFlavor>::new(Arc::new(MockImageBackend::default()));
        assert!(!panel.export_result(Arc::new(RecordingExporter)));

        panel.submit("neon city", ()).unwrap();
        settle(&mut panel, &mut rx).await;
        let url = panel.lifecycle().result().unwrap().payload.url.clone();
        assert!(url.starts_with("https://picsum.photos/512/512?random="));

        assert!(panel.export_result(Arc::new(RecordingExporter)));
        match settle(&mut panel, &mut rx).await {
            PanelUpdate::Exported(Ok(receipt)) => assert_eq!(receipt.bytes, url.len()),
            other => panic!("unexpected update: {other:?}"),
        }
    }
}
