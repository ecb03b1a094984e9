/// The viewer markup as seen by the lightbox: one container, an image, a
/// caption, a position counter and the two step buttons.
pub trait ViewerSurface {
    /// Toggles the viewer's active state class.
    fn set_active(&mut self, active: bool);

    /// Suspends or restores scrolling of the page behind the viewer.
    fn set_scroll_locked(&mut self, locked: bool);

    fn show_image(&mut self, url: &str, alt: &str);

    /// Toggles the image's loaded class, which drives the reveal transition.
    fn set_image_loaded(&mut self, loaded: bool);

    fn set_caption(&mut self, caption: &str);

    fn set_counter(&mut self, text: &str);

    fn set_nav_disabled(&mut self, prev: bool, next: bool);
}

/// In-memory surface for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    pub active: bool,
    pub scroll_locked: bool,
    pub image_url: Option<String>,
    pub image_alt: String,
    pub image_loaded: bool,
    pub caption: String,
    pub counter: String,
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ViewerSurface for MemorySurface {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn show_image(&mut self, url: &str, alt: &str) {
        self.image_url = Some(url.to_string());
        self.image_alt = alt.to_string();
    }

    fn set_image_loaded(&mut self, loaded: bool) {
        self.image_loaded = loaded;
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    fn set_counter(&mut self, text: &str) {
        self.counter = text.to_string();
    }

    fn set_nav_disabled(&mut self, prev: bool, next: bool) {
        self.prev_disabled = prev;
        self.next_disabled = next;
    }
}
