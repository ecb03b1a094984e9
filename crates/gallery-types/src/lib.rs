pub mod types;

pub use types::{EntryAttributes, GalleryItem, Key};
