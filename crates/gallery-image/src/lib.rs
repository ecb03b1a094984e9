pub mod lazy;
pub mod loader;

pub use lazy::{DeferredThumbnail, LazyThumbnails, ObserverSupport, ThumbnailAction, ThumbnailId};
pub use loader::{ImageLoader, LoadError, LoadRequest, LoadTicket};
