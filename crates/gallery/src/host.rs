//! Decisions the browser binding makes about page events, kept free of DOM
//! types so they run under plain `cargo test`.

use gallery_image::{LoadTicket, ObserverSupport};

/// A click closes the viewer only when it lands on the container itself,
/// not on the image or a control inside it.
pub fn is_backdrop_target<T: PartialEq>(target: Option<&T>, backdrop: &T) -> bool {
    target.is_some_and(|target| target == backdrop)
}

/// Thumbnails are observed when the page has `IntersectionObserver` and
/// promoted eagerly otherwise.
pub fn observer_support(has_intersection_observer: bool) -> ObserverSupport {
    if has_intersection_observer {
        ObserverSupport::Available
    } else {
        ObserverSupport::Unavailable
    }
}

/// The one off-screen fetch in flight. Starting another hands back the
/// superseded fetch so its listeners can be released.
#[derive(Debug)]
pub struct PreloadSlot<T> {
    current: Option<(LoadTicket, T)>,
}

impl<T> Default for PreloadSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T> PreloadSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> Option<LoadTicket> {
        self.current.as_ref().map(|(ticket, _)| *ticket)
    }

    pub fn replace(&mut self, ticket: LoadTicket, preload: T) -> Option<T> {
        self.current
            .replace((ticket, preload))
            .map(|(_, superseded)| superseded)
    }

    pub fn clear(&mut self) -> Option<T> {
        self.current.take().map(|(_, preload)| preload)
    }
}
