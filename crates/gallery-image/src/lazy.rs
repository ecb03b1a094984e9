//! Deferred thumbnail loading for the gallery grid.
//!
//! Thumbnails rendered with a deferred source stay blank until they come
//! near the viewport. Without a visibility observer every deferred
//! thumbnail is promoted at once, so no image is ever left unloaded.

use std::collections::BTreeMap;
use tracing::{debug, info};

/// Position of a thumbnail in the document's deferred-thumbnail list.
pub type ThumbnailId = usize;

/// Whether the host can report viewport intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverSupport {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredThumbnail {
    pub id: ThumbnailId,
    pub src: String,
}

impl DeferredThumbnail {
    pub fn new(id: ThumbnailId, src: impl Into<String>) -> Self {
        Self {
            id,
            src: src.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailAction {
    /// Start watching the thumbnail's visibility.
    Observe(ThumbnailId),
    /// Copy `src` into the real source, drop the deferred marker and stop
    /// watching the thumbnail.
    Promote { id: ThumbnailId, src: String },
    /// Stop watching without touching the source.
    Unobserve(ThumbnailId),
}

#[derive(Debug, Clone)]
pub struct LazyThumbnails {
    support: ObserverSupport,
    pending: BTreeMap<ThumbnailId, String>,
}

impl LazyThumbnails {
    pub fn new(support: ObserverSupport) -> Self {
        Self {
            support,
            pending: BTreeMap::new(),
        }
    }

    pub fn support(&self) -> ObserverSupport {
        self.support
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: ThumbnailId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn register(
        &mut self,
        thumbnails: impl IntoIterator<Item = DeferredThumbnail>,
    ) -> Vec<ThumbnailAction> {
        let mut actions = Vec::new();

        for thumb in thumbnails {
            if thumb.src.is_empty() {
                debug!("Thumbnail {} has an empty deferred source", thumb.id);
                continue;
            }

            match self.support {
                ObserverSupport::Available => {
                    self.pending.insert(thumb.id, thumb.src);
                    actions.push(ThumbnailAction::Observe(thumb.id));
                }
                ObserverSupport::Unavailable => actions.push(ThumbnailAction::Promote {
                    id: thumb.id,
                    src: thumb.src,
                }),
            }
        }

        if self.support == ObserverSupport::Unavailable && !actions.is_empty() {
            info!(
                "No intersection observer, loading {} thumbnails eagerly",
                actions.len()
            );
        }

        actions
    }

    /// Handles an observer report. Promotion happens at most once per
    /// thumbnail.
    pub fn on_visibility(
        &mut self,
        id: ThumbnailId,
        intersecting: bool,
    ) -> Option<ThumbnailAction> {
        if !intersecting {
            return None;
        }

        match self.pending.remove(&id) {
            Some(src) => Some(ThumbnailAction::Promote { id, src }),
            None => Some(ThumbnailAction::Unobserve(id)),
        }
    }
}
