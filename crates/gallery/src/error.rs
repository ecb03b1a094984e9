use gallery_config::ConfigError;

pub type GalleryResult<T> = Result<T, GalleryError>;

#[derive(thiserror::Error, Debug)]
pub enum GalleryError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lightbox element #{0} is missing")]
    MissingElement(String),

    #[error("Element #{id} is not a {expected}")]
    UnexpectedElement { id: String, expected: &'static str },

    #[error("DOM error: {0}")]
    Dom(String),
}
