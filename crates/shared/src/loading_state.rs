use serde::{Deserialize, Serialize};
use std::fmt;

/// Load state of the lightbox image surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadingState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadingState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadingState::Failed(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadingState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingState::Idle => write!(f, "Idle"),
            LoadingState::Loading => write!(f, "Loading"),
            LoadingState::Ready => write!(f, "Ready"),
            LoadingState::Failed(msg) => write!(f, "Failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingEvent {
    StartLoading,
    LoadComplete,
    LoadFailed(String),
    Reset,
}

impl LoadingEvent {
    pub fn apply_to_state(self, current_state: LoadingState) -> LoadingState {
        match (self, current_state) {
            (LoadingEvent::StartLoading, _) => LoadingState::Loading,
            (LoadingEvent::Reset, _) => LoadingState::Idle,
            // Completions only count against a load that is still pending
            (LoadingEvent::LoadComplete, LoadingState::Loading) => LoadingState::Ready,
            (LoadingEvent::LoadFailed(msg), LoadingState::Loading) => LoadingState::Failed(msg),
            (_, state) => state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_state_properties() {
        let idle = LoadingState::Idle;
        assert!(idle.is_idle());
        assert!(!idle.is_loading());

        let loading = LoadingState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_ready());
        assert!(!loading.is_failed());

        let ready = LoadingState::Ready;
        assert!(ready.is_ready());
        assert!(ready.error_message().is_none());

        let failed = LoadingState::Failed("404".to_string());
        assert!(failed.is_failed());
        assert_eq!(failed.error_message(), Some("404"));
    }

    #[test]
    fn test_state_transitions() {
        let state = LoadingEvent::StartLoading.apply_to_state(LoadingState::Idle);
        assert_eq!(state, LoadingState::Loading);

        let state = LoadingEvent::LoadComplete.apply_to_state(state);
        assert_eq!(state, LoadingState::Ready);

        let state = LoadingEvent::Reset.apply_to_state(state);
        assert_eq!(state, LoadingState::Idle);

        let state = LoadingEvent::StartLoading.apply_to_state(state);
        let state = LoadingEvent::LoadFailed("network".to_string()).apply_to_state(state);
        assert_eq!(state, LoadingState::Failed("network".to_string()));
    }

    #[test]
    fn test_completion_without_pending_load_is_ignored() {
        let state = LoadingEvent::LoadComplete.apply_to_state(LoadingState::Idle);
        assert_eq!(state, LoadingState::Idle);

        let late = LoadingEvent::LoadFailed("late".to_string());
        let state = late.apply_to_state(LoadingState::Ready);
        assert_eq!(state, LoadingState::Ready);
    }

    #[test]
    fn test_display_formatting() {
        assert_eq!(LoadingState::Idle.to_string(), "Idle");
        assert_eq!(LoadingState::Loading.to_string(), "Loading");
        assert_eq!(LoadingState::Ready.to_string(), "Ready");
        assert_eq!(
            LoadingState::Failed("Network error".to_string()).to_string(),
            "Failed: Network error"
        );
    }

    #[test]
    fn test_default_state() {
        assert_eq!(LoadingState::default(), LoadingState::Idle);
    }
}
