use serde::Serialize;
use tokio::sync::mpsc;

use crate::entry::SerpEntry;
use crate::utils::display_url;

/// Snapshot published to the preview boundary
///
/// Carries the entry fields plus the display form of the URL (scheme
/// stripped), which is how a search result renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewSnapshot {
    /// SEO title as it would render
    pub title: String,

    /// Meta description as it would render
    pub description: String,

    /// Target page URL
    pub url: String,

    /// URL as a search result displays it
    pub display_url: String,
}

impl PreviewSnapshot {
    /// Build a snapshot from the current entry state
    pub fn from_entry(entry: &SerpEntry) -> Self {
        Self {
            title: entry.title.clone(),
            description: entry.description.clone(),
            url: entry.url.clone(),
            display_url: display_url(&entry.url),
        }
    }
}

/// Publishes entry snapshots to the preview consumer
///
/// The consumer side is a channel receiver handed out at session start, so a
/// renderer can simply await snapshots as they arrive.
/// Every trigger republishes unconditionally; there is no debouncing, and
/// repeated publishes of an unchanged entry carry an unchanged value.
#[derive(Debug)]
pub struct PreviewSynchronizer {
    sender: mpsc::Sender<PreviewSnapshot>,
}

impl PreviewSynchronizer {
    /// Create a synchronizer and the receiver its snapshots arrive on
    pub fn channel() -> (Self, mpsc::Receiver<PreviewSnapshot>) {
        let (sender, receiver) = mpsc::channel(256);
        (Self { sender }, receiver)
    }

    /// Publish the current entry to the preview boundary
    ///
    /// A full or disconnected consumer never wedges the workflow; the
    /// snapshot is dropped with a warning instead.
    pub fn sync(&self, entry: &SerpEntry) {
        let snapshot = PreviewSnapshot::from_entry(entry);
        ::log::debug!("Publishing preview for: {}", snapshot.display_url);

        if let Err(e) = self.sender.try_send(snapshot) {
            ::log::warn!("Preview consumer unavailable, snapshot dropped: {}", e);
        }
    }
}
