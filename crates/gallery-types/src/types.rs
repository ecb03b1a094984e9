use serde::{Deserialize, Serialize};

/// One image of the gallery as read from the grid markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub url: String,
    pub caption: String,
}

impl GalleryItem {
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: caption.into(),
        }
    }
}

/// Raw data attributes of a grid entry's trigger link, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryAttributes {
    pub full_url: Option<String>,
    pub caption: Option<String>,
}

impl EntryAttributes {
    pub fn new(full_url: Option<String>, caption: Option<String>) -> Self {
        Self { full_url, caption }
    }

    /// Converts to an item. A missing or blank URL yields `None`; a missing
    /// caption becomes the empty string.
    pub fn into_item(self) -> Option<GalleryItem> {
        let url = self.full_url.filter(|url| !url.trim().is_empty())?;

        Some(GalleryItem {
            url,
            caption: self.caption.unwrap_or_default(),
        })
    }
}

/// Keys the lightbox reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            _ => Key::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_without_caption_gets_empty_caption() {
        let item = EntryAttributes::new(Some("/media/a.jpg".to_string()), None)
            .into_item()
            .unwrap();
        assert_eq!(item, GalleryItem::new("/media/a.jpg", ""));
    }

    #[test]
    fn test_entry_without_url_is_rejected() {
        assert!(EntryAttributes::new(None, Some("x".to_string())).into_item().is_none());
        assert!(EntryAttributes::new(Some("  ".to_string()), None).into_item().is_none());
    }

    #[test]
    fn test_dom_key_mapping() {
        assert_eq!(Key::from_dom_key("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom_key("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom_key("Enter"), Key::Other);
    }
}
