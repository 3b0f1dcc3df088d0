use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An open preview of a local video. Released when dropped.
#[derive(Debug)]
pub struct VideoPreview {
    path: PathBuf,
    live: Arc<AtomicUsize>,
}

impl VideoPreview {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for VideoPreview {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Holds at most one preview; opening another or closing the slot releases
/// the previous one.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    current: Option<VideoPreview>,
    live: Arc<AtomicUsize>,
}

impl PreviewSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, path: impl Into<PathBuf>) -> &VideoPreview {
        self.live.fetch_add(1, Ordering::SeqCst);
        let preview = VideoPreview {
            path: path.into(),
            live: Arc::clone(&self.live),
        };
        self.current.insert(preview)
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<&VideoPreview> {
        self.current.as_ref()
    }

    /// Previews opened through this slot and not yet released.
    #[must_use]
    pub fn live_previews(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacing_releases_previous_preview() {
        let mut slot = PreviewSlot::new();
        slot.open("/v/a.mp4");
        slot.open("/v/b.mp4");
        assert_eq!(slot.live_previews(), 1);
        assert_eq!(slot.current().map(VideoPreview::path), Some(Path::new("/v/b.mp4")));
    }

    #[test]
    fn closing_releases_preview() {
        let mut slot = PreviewSlot::new();
        slot.open("/v/a.mp4");
        slot.close();
        assert_eq!(slot.live_previews(), 0);
        assert!(slot.current().is_none());
    }
}
