//! Lightbox controller state

use crate::{
    key_binds::{self, KeyAction},
    message::{Command, Message},
    surface::ViewerSurface,
};
use gallery_config::LightboxConfig;
use gallery_image::{ImageLoader, LoadTicket};
use gallery_nav::{NavState, SwipeDirection, SwipeTracker};
use gallery_types::{EntryAttributes, GalleryItem, Key};
use shared::{LoadingState, counter_text};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Gallery items read from the grid, plus the item index each grid entry
/// opens. Entries without a full-size URL get no index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryIndex {
    items: Vec<GalleryItem>,
    slots: Vec<Option<usize>>,
}

impl GalleryIndex {
    pub fn from_entries(entries: impl IntoIterator<Item = EntryAttributes>) -> Self {
        let mut items = Vec::new();
        let mut slots = Vec::new();

        for (position, entry) in entries.into_iter().enumerate() {
            match entry.into_item() {
                Some(item) => {
                    slots.push(Some(items.len()));
                    items.push(item);
                }
                None => {
                    warn!("Gallery entry {position} has no full-size URL, skipping");
                    slots.push(None);
                }
            }
        }

        Self { items, slots }
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Item index opened by each grid entry, in document order.
    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn into_items(self) -> Vec<GalleryItem> {
        self.items
    }
}

pub struct Lightbox<S: ViewerSurface> {
    nav: NavState,
    loader: ImageLoader,
    swipe: SwipeTracker,
    key_binds: HashMap<Key, KeyAction>,
    surface: S,
}

impl<S: ViewerSurface> Lightbox<S> {
    pub fn new(items: Vec<GalleryItem>, surface: S, config: &LightboxConfig) -> Self {
        info!("Gallery lightbox ready with {} images", items.len());

        Self {
            nav: NavState::new(items),
            loader: ImageLoader::new(),
            swipe: SwipeTracker::new(config.swipe_threshold_px),
            key_binds: key_binds::init_key_binds(),
            surface,
        }
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_selected()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.nav.index()
    }

    pub fn items(&self) -> &[GalleryItem] {
        self.nav.items()
    }

    pub fn loading_state(&self) -> &LoadingState {
        self.loader.state()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Closes the viewer so the page is left scrollable with the viewer
    /// hidden. Hosts call this before releasing the surface.
    pub fn teardown(&mut self) {
        self.close();
    }

    /// Releases the surface in its closed state.
    pub fn into_surface(mut self) -> S {
        self.teardown();
        self.surface
    }

    pub fn update(&mut self, message: Message) -> Command {
        match message {
            Message::Open(idx) => self.open(idx),
            Message::Close => {
                self.close();
                Command::none()
            }
            Message::Prev => self.go_prev(),
            Message::Next => self.go_next(),
            Message::BackdropClick { on_backdrop } => {
                if on_backdrop {
                    self.close();
                }
                Command::none()
            }
            Message::Key(key) => {
                if !self.is_open() {
                    return Command::none();
                }

                match self.key_binds.get(&key).copied() {
                    Some(action) => self.update(action.message()),
                    None => Command::none(),
                }
            }
            Message::TouchStart(x) => {
                self.swipe.start(x);
                Command::none()
            }
            Message::TouchEnd(x) => match self.swipe.end(x) {
                Some(SwipeDirection::Left) => self.go_next(),
                Some(SwipeDirection::Right) => self.go_prev(),
                None => Command::none(),
            },
            Message::ImageLoaded(ticket) => {
                self.image_loaded(ticket);
                Command::none()
            }
            Message::ImageFailed { ticket, reason } => {
                self.image_failed(ticket, reason);
                Command::none()
            }
        }
    }

    fn open(&mut self, idx: usize) -> Command {
        if self.nav.select(idx).is_none() {
            warn!(
                "Ignoring open of image {idx}, gallery has {} images",
                self.nav.total()
            );
            return Command::none();
        }

        debug!("Opening lightbox at image {idx}");
        self.surface.set_active(true);
        self.surface.set_scroll_locked(true);

        let command = self.load_current();
        self.update_counter();
        self.update_nav_buttons();
        command
    }

    fn close(&mut self) {
        if !self.is_open() {
            return;
        }

        debug!("Closing lightbox");
        self.nav.deselect();
        self.loader.invalidate();
        self.surface.set_active(false);
        self.surface.set_scroll_locked(false);
        self.surface.set_image_loaded(false);
    }

    fn go_prev(&mut self) -> Command {
        if self.nav.go_prev().is_none() {
            return Command::none();
        }

        self.after_step()
    }

    fn go_next(&mut self) -> Command {
        if self.nav.go_next().is_none() {
            return Command::none();
        }

        self.after_step()
    }

    fn after_step(&mut self) -> Command {
        let command = self.load_current();
        self.update_counter();
        self.update_nav_buttons();
        command
    }

    /// Starts the off-screen fetch for the current image. The caption is
    /// shown right away; the image waits for `ImageLoaded`.
    fn load_current(&mut self) -> Command {
        let Some(idx) = self.nav.index() else {
            return Command::none();
        };
        let Some(item) = self.nav.get(idx) else {
            return Command::none();
        };

        self.surface.set_image_loaded(false);
        self.surface.set_caption(&item.caption);

        Command::Preload(self.loader.begin(idx, item.url.as_str()))
    }

    fn image_loaded(&mut self, ticket: LoadTicket) {
        let idx = match self.loader.complete(ticket) {
            Ok(idx) => idx,
            Err(err) => {
                debug!("Discarding image completion: {err}");
                return;
            }
        };

        let Some(item) = self.nav.get(idx) else {
            return;
        };

        self.surface.show_image(&item.url, &item.caption);
        self.surface.set_image_loaded(true);
    }

    fn image_failed(&mut self, ticket: LoadTicket, reason: String) {
        let url = self
            .nav
            .get(ticket.index())
            .map(|item| item.url.clone())
            .unwrap_or_default();

        match self.loader.fail(ticket, reason.as_str()) {
            Ok(idx) => warn!("Failed to load image {idx} ({url}): {reason}"),
            Err(err) => debug!("Discarding image failure: {err}"),
        }
    }

    fn update_counter(&mut self) {
        if let Some(idx) = self.nav.index() {
            self.surface.set_counter(&counter_text(idx, self.nav.total()));
        }
    }

    fn update_nav_buttons(&mut self) {
        let prev = self.nav.is_first();
        let next = self.nav.is_last();
        self.surface.set_nav_disabled(prev, next);
    }
}
