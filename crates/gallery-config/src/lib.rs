use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: u64 = 1;

/// Horizontal travel, in CSS pixels, a touch must exceed to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Pre-load margin around the viewport for deferred thumbnails.
pub const DEFAULT_LAZY_MARGIN_PX: u32 = 50;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported config version {found} (expected {expected})")]
    Version { found: u64, expected: u64 },

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Element ids, classes and data attributes the lightbox binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub grid_id: String,
    pub lightbox_id: String,
    pub image_id: String,
    pub caption_id: String,
    pub counter_id: String,
    pub close_id: String,
    pub prev_id: String,
    pub next_id: String,
    pub item_class: String,
    pub link_class: String,
    pub thumb_class: String,
    /// `dataset` key of the full-size URL (`data-full-url`).
    pub full_url_key: String,
    /// `dataset` key of the caption (`data-caption`).
    pub caption_key: String,
    /// Attribute holding a thumbnail's deferred source.
    pub deferred_src_attr: String,
    pub active_class: String,
    pub loaded_class: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            grid_id: "galleryGrid".to_string(),
            lightbox_id: "galleryLightbox".to_string(),
            image_id: "lightboxImage".to_string(),
            caption_id: "lightboxCaption".to_string(),
            counter_id: "lightboxCounter".to_string(),
            close_id: "lightboxClose".to_string(),
            prev_id: "lightboxPrev".to_string(),
            next_id: "lightboxNext".to_string(),
            item_class: "gallery-item".to_string(),
            link_class: "gallery-link".to_string(),
            thumb_class: "gallery-thumb".to_string(),
            full_url_key: "fullUrl".to_string(),
            caption_key: "caption".to_string(),
            deferred_src_attr: "data-src".to_string(),
            active_class: "active".to_string(),
            loaded_class: "loaded".to_string(),
        }
    }
}

impl Selectors {
    /// CSS selector matching every thumbnail still waiting for its source.
    pub fn deferred_thumb_selector(&self) -> String {
        format!(".{}[{}]", self.thumb_class, self.deferred_src_attr)
    }

    pub fn item_selector(&self) -> String {
        format!(".{}", self.item_class)
    }

    pub fn link_selector(&self) -> String {
        format!(".{}", self.link_class)
    }

    /// Every selector value keyed by its config path.
    pub fn fields(&self) -> [(&'static str, &str); 16] {
        [
            ("selectors.grid_id", &self.grid_id),
            ("selectors.lightbox_id", &self.lightbox_id),
            ("selectors.image_id", &self.image_id),
            ("selectors.caption_id", &self.caption_id),
            ("selectors.counter_id", &self.counter_id),
            ("selectors.close_id", &self.close_id),
            ("selectors.prev_id", &self.prev_id),
            ("selectors.next_id", &self.next_id),
            ("selectors.item_class", &self.item_class),
            ("selectors.link_class", &self.link_class),
            ("selectors.thumb_class", &self.thumb_class),
            ("selectors.full_url_key", &self.full_url_key),
            ("selectors.caption_key", &self.caption_key),
            ("selectors.deferred_src_attr", &self.deferred_src_attr),
            ("selectors.active_class", &self.active_class),
            ("selectors.loaded_class", &self.loaded_class),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub version: u64,
    pub selectors: Selectors,
    pub swipe_threshold_px: f64,
    pub lazy_margin_px: u32,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            selectors: Selectors::default(),
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            lazy_margin_px: DEFAULT_LAZY_MARGIN_PX,
        }
    }
}

impl LightboxConfig {
    /// Parses a JSON config; omitted fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::Version {
                found: self.version,
                expected: CONFIG_VERSION,
            });
        }

        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px < 0.0 {
            return Err(ConfigError::Invalid {
                field: "swipe_threshold_px",
                reason: format!("{} is not a non-negative distance", self.swipe_threshold_px),
            });
        }

        for (field, value) in self.selectors.fields() {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// `rootMargin` string for the thumbnail intersection observer.
    pub fn root_margin(&self) -> String {
        format!("{}px", self.lazy_margin_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_gallery_markup() {
        let config = LightboxConfig::default();
        assert_eq!(config.selectors.grid_id, "galleryGrid");
        assert_eq!(config.selectors.lightbox_id, "galleryLightbox");
        assert_eq!(config.swipe_threshold_px, 50.0);
        assert_eq!(config.root_margin(), "50px");
        assert_eq!(
            config.selectors.deferred_thumb_selector(),
            ".gallery-thumb[data-src]"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "swipe_threshold_px": 80, "selectors": { "grid_id": "photos" } }"#;
        let config = LightboxConfig::from_json(json).unwrap();
        assert_eq!(config.swipe_threshold_px, 80.0);
        assert_eq!(config.selectors.grid_id, "photos");
        assert_eq!(config.selectors.lightbox_id, "galleryLightbox");
        assert_eq!(config.lazy_margin_px, 50);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = LightboxConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = LightboxConfig::from_json(r#"{ "swipe_threshold_px": -1 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "swipe_threshold_px",
                ..
            }
        ));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let err = LightboxConfig::from_json(r#"{ "version": 7 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Version { found: 7, expected: 1 }));
    }

    #[test]
    fn test_empty_grid_id_rejected() {
        let err = LightboxConfig::from_json(r#"{ "selectors": { "grid_id": "" } }"#).unwrap_err();
        assert!(err.to_string().contains("selectors.grid_id"));
    }

    #[test]
    fn test_every_empty_selector_rejected() {
        for key in ["deferred_src_attr", "full_url_key", "image_id", "thumb_class"] {
            let json = format!(r#"{{ "selectors": {{ "{key}": " " }} }}"#);
            let err = LightboxConfig::from_json(&json).unwrap_err();
            let expected = format!("selectors.{key}");
            assert!(
                matches!(err, ConfigError::Invalid { field, .. } if field == expected),
                "{key} accepted empty: {err}"
            );
        }
    }

    #[test]
    fn test_fields_cover_each_selector() {
        let mut config = LightboxConfig::default();
        assert_eq!(config.selectors.fields().len(), 16);

        config.selectors.loaded_class.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("selectors.loaded_class"));
    }
}
