//! Generation backends.
//!
//! Both shipped backends are mocks: they sleep for a fixed latency and
//! return canned output. A real model client plugs in by implementing
//! `GenerationBackend` for the flavor it serves.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::error::GenerationOutcome;
use super::image::{
    image_reference, Clock, ImageFlavor, ImageReference, SystemClock, DEFAULT_IMAGE_BASE_URL,
};
use super::templates;
use super::text::{ContentType, TextFlavor};
use super::{Flavor, GenerationRequest};

/// Simulated model latency.
pub const MOCK_LATENCY: Duration = Duration::from_millis(2000);

/// Produces the payload for one request.
#[async_trait]
pub trait GenerationBackend<F: Flavor>: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<F::Params>) -> GenerationOutcome<F::Output>;
}

/// Mock image generator: waits, then points at a random placeholder image.
pub struct MockImageBackend {
    latency: Duration,
    base_url: String,
    clock: Arc<dyn Clock>,
}

impl MockImageBackend {
    pub fn new(latency: Duration, base_url: impl Into<String>) -> Self {
        Self::with_clock(latency, base_url, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(latency: Duration, base_url: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            latency,
            base_url: base_url.into(),
            clock,
        }
    }
}

impl Default for MockImageBackend {
    fn default() -> Self {
        Self::new(MOCK_LATENCY, DEFAULT_IMAGE_BASE_URL)
    }
}

#[async_trait]
impl GenerationBackend<ImageFlavor> for MockImageBackend {
    async fn generate(&self, request: &GenerationRequest<()>) -> GenerationOutcome<ImageReference> {
        tokio::time::sleep(self.latency).await;
        let image = image_reference(&self.base_url, self.clock.now_millis());
        info!(request_id = %request.id, url = %image.url, "mock image generated");
        Ok(image)
    }
}

/// Mock text generator: waits, then fills in the selected template.
pub struct MockTextBackend {
    latency: Duration,
}

impl MockTextBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockTextBackend {
    fn default() -> Self {
        Self::new(MOCK_LATENCY)
    }
}

#[async_trait]
impl GenerationBackend<TextFlavor> for MockTextBackend {
    async fn generate(
        &self,
        request: &GenerationRequest<ContentType>,
    ) -> GenerationOutcome<String> {
        tokio::time::sleep(self.latency).await;
        let text = templates::render(request.params, &request.prompt);
        info!(
            request_id = %request.id,
            content_type = %request.params,
            chars = text.len(),
            "mock text generated"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::time::Instant;

    struct StepClock(AtomicU64);

    impl Clock for StepClock {
        fn now_millis(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn image_backend_waits_then_builds_reference() {
        let backend = MockImageBackend::with_clock(
            Duration::from_millis(2000),
            "http://img.test/512",
            Arc::new(StepClock(AtomicU64::new(100))),
        );
        let req = GenerationRequest::new("a cat", ());
        let start = Instant::now();
        let first = backend.generate(&req).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(first.url, "http://img.test/512?random=100");

        let second = backend.generate(&req).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn text_backend_renders_template() {
        let backend = MockTextBackend::default();
        let req = GenerationRequest::new("love", ContentType::Poem);
        let out = backend.generate(&req).await.unwrap();
        assert_eq!(out, templates::render(ContentType::Poem, "love"));
    }
}
