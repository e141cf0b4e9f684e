//! Image flavor. Placeholder image references and export filenames.
//!
//! The mock backend never looks at the prompt. The image is identified
//! only by a clock reading appended to a fixed base URL, so every
//! generation points at a fresh random placeholder.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::Flavor;

/// Placeholder image service used when no base URL is configured.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://picsum.photos/512/512";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageFlavor;

impl Flavor for ImageFlavor {
    type Params = ();
    type Output = ImageReference;
    const NAME: &'static str = "image";
}

/// Opaque reference to an externally hosted image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    pub url: String,
    /// Clock reading the reference was derived from.
    pub timestamp_ms: u64,
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Build `<base>?random=<timestamp>`.
pub fn image_reference(base_url: &str, timestamp_ms: u64) -> ImageReference {
    let base = base_url.trim_end_matches('?');
    let sep = if base.contains('?') { '&' } else { '?' };
    ImageReference {
        url: format!("{base}{sep}random={timestamp_ms}"),
        timestamp_ms,
    }
}

/// Suggested filename for a downloaded image.
pub fn download_filename(timestamp_ms: u64) -> String {
    format!("ai-generated-{timestamp_ms}.png")
}

/// Millisecond clock feeding image references.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Wall clock that never repeats or goes backwards.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        let wall = super::now_millis();
        let prev = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(wall.max(last + 1))
            }) {
            Ok(prev) | Err(prev) => prev,
        };
        wall.max(prev + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_appends_random_param() {
        let r = image_reference(DEFAULT_IMAGE_BASE_URL, 1_700_000_000_123);
        assert_eq!(r.url, "https://picsum.photos/512/512?random=1700000000123");
        assert_eq!(r.timestamp_ms, 1_700_000_000_123);
        assert_eq!(r.to_string(), r.url);
    }

    #[test]
    fn reference_respects_existing_query() {
        let r = image_reference("https://img.example/gen?size=256", 7);
        assert_eq!(r.url, "https://img.example/gen?size=256&random=7");
    }

    #[test]
    fn reference_is_pure() {
        assert_eq!(image_reference("http://x", 5), image_reference("http://x", 5));
    }

    #[test]
    fn filename_format() {
        assert_eq!(download_filename(42), "ai-generated-42.png");
    }

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = SystemClock::new();
        let mut last = clock.now_millis();
        for _ in 0..1000 {
            let now = clock.now_millis();
            assert!(now > last);
            last = now;
        }
    }
}
