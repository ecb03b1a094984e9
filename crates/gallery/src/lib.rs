pub mod error;
pub mod host;
pub mod key_binds;
pub mod lightbox;
pub mod message;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{GalleryError, GalleryResult};
pub use gallery_config::LightboxConfig;
pub use gallery_types::{EntryAttributes, GalleryItem, Key};
pub use lightbox::{GalleryIndex, Lightbox};
pub use message::{Command, Message};
pub use surface::{MemorySurface, ViewerSurface};
