use shared::{LoadingEvent, LoadingState};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Stale load ticket for image {index} (generation {generation})")]
    Stale { index: usize, generation: u64 },
}

/// Handle of one full-size image load. Only the most recently issued
/// ticket may change the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    generation: u64,
    index: usize,
}

impl LoadTicket {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Off-screen preload the host must perform, answering with the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImageLoader {
    generation: u64,
    pending: Option<LoadTicket>,
    state: LoadingState,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn pending(&self) -> Option<LoadTicket> {
        self.pending
    }

    /// Issues a new ticket, superseding any load still in flight.
    pub fn begin(&mut self, index: usize, url: impl Into<String>) -> LoadRequest {
        self.generation += 1;
        let ticket = LoadTicket {
            generation: self.generation,
            index,
        };

        if let Some(previous) = self.pending.replace(ticket) {
            debug!(
                "Superseding load of image {} with image {}",
                previous.index, index
            );
        }
        self.apply(LoadingEvent::StartLoading);

        LoadRequest {
            ticket,
            url: url.into(),
        }
    }

    /// Accepts a completion. Returns the image index it belongs to, or
    /// `LoadError::Stale` when a newer request has been issued since.
    pub fn complete(&mut self, ticket: LoadTicket) -> Result<usize, LoadError> {
        self.take_pending(ticket)?;
        self.apply(LoadingEvent::LoadComplete);
        Ok(ticket.index)
    }

    /// Records a failed load. Nothing is retried; the surface simply never
    /// reaches the ready state for this ticket.
    pub fn fail(
        &mut self,
        ticket: LoadTicket,
        reason: impl Into<String>,
    ) -> Result<usize, LoadError> {
        self.take_pending(ticket)?;
        self.apply(LoadingEvent::LoadFailed(reason.into()));
        Ok(ticket.index)
    }

    /// Drops the in-flight request so its completion is treated as stale.
    pub fn invalidate(&mut self) {
        self.pending = None;
        self.generation += 1;
        self.apply(LoadingEvent::Reset);
    }

    fn take_pending(&mut self, ticket: LoadTicket) -> Result<(), LoadError> {
        if self.pending != Some(ticket) {
            return Err(LoadError::Stale {
                index: ticket.index,
                generation: ticket.generation,
            });
        }

        self.pending = None;
        Ok(())
    }

    fn apply(&mut self, event: LoadingEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = event.apply_to_state(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_then_complete() {
        let mut loader = ImageLoader::new();
        let request = loader.begin(2, "/media/c.jpg");

        assert_eq!(request.url, "/media/c.jpg");
        assert_eq!(request.ticket.index(), 2);
        assert!(loader.state().is_loading());

        assert_eq!(loader.complete(request.ticket), Ok(2));
        assert!(loader.state().is_ready());
        assert!(loader.pending().is_none());
    }

    #[test]
    fn test_superseded_ticket_is_stale() {
        let mut loader = ImageLoader::new();
        let first = loader.begin(0, "/media/a.jpg");
        let second = loader.begin(1, "/media/b.jpg");

        assert!(matches!(
            loader.complete(first.ticket),
            Err(LoadError::Stale { index: 0, .. })
        ));
        assert!(loader.state().is_loading());

        assert_eq!(loader.complete(second.ticket), Ok(1));
    }

    #[test]
    fn test_same_index_reissued_is_still_distinct() {
        let mut loader = ImageLoader::new();
        let first = loader.begin(0, "/media/a.jpg");
        let second = loader.begin(0, "/media/a.jpg");

        assert_ne!(first.ticket, second.ticket);
        assert!(loader.complete(first.ticket).is_err());
    }

    #[test]
    fn test_invalidate_makes_pending_stale() {
        let mut loader = ImageLoader::new();
        let request = loader.begin(0, "/media/a.jpg");
        loader.invalidate();

        assert!(loader.state().is_idle());
        assert!(loader.complete(request.ticket).is_err());
        assert!(loader.state().is_idle());
    }

    #[test]
    fn test_failure_records_reason() {
        let mut loader = ImageLoader::new();
        let request = loader.begin(0, "/media/a.jpg");

        assert_eq!(loader.fail(request.ticket, "404"), Ok(0));
        assert_eq!(loader.state().error_message(), Some("404"));
        assert!(loader.fail(request.ticket, "again").is_err());
    }

    #[test]
    fn test_completion_is_accepted_once() {
        let mut loader = ImageLoader::new();
        let request = loader.begin(0, "/media/a.jpg");

        assert!(loader.complete(request.ticket).is_ok());
        assert!(loader.complete(request.ticket).is_err());
    }
}
