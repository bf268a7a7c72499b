mod bus;
mod events;

pub use bus::EventBus;
pub use events::{GridEvent, PageDirection, StudioEvent};

pub trait EventHandler {
    fn handle_event(&mut self, event: &StudioEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&StudioEvent),
{
    fn handle_event(&mut self, event: &StudioEvent) {
        self(event)
    }
}

/// Writes every event to the log at debug level
#[derive(Debug, Default)]
pub struct LoggingHandler;

impl EventHandler for LoggingHandler {
    fn handle_event(&mut self, event: &StudioEvent) {
        log::debug!("studio event: {:?}", event);
    }
}
