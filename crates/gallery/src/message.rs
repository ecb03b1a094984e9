use gallery_image::{LoadRequest, LoadTicket};
use gallery_types::Key;

/// Everything the page can tell the lightbox. Each message is handled to
/// completion before the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A grid entry was activated.
    Open(usize),
    Close,
    Prev,
    Next,
    /// A click landed on the viewer; `on_backdrop` is true only when the
    /// target is the viewer container itself.
    BackdropClick { on_backdrop: bool },
    Key(Key),
    TouchStart(f64),
    TouchEnd(f64),
    ImageLoaded(LoadTicket),
    ImageFailed { ticket: LoadTicket, reason: String },
}

/// Work the host performs on behalf of the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    None,
    /// Fetch the image off-screen and answer with `ImageLoaded` or
    /// `ImageFailed` carrying the same ticket.
    Preload(LoadRequest),
}

impl Command {
    pub fn none() -> Self {
        Self::None
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }

    pub fn preload_request(&self) -> Option<&LoadRequest> {
        match self {
            Command::Preload(request) => Some(request),
            Command::None => None,
        }
    }
}
