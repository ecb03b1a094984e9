pub mod labels;
pub mod loading_state;

pub use labels::counter_text;
pub use loading_state::{LoadingEvent, LoadingState};
