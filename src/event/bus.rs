use std::cell::RefCell;

use crate::event::{EventHandler, StudioEvent};

/// A simple event bus for broadcasting studio events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// Handlers must not emit on the same bus while handling.
    pub fn emit(&self, event: StudioEvent) {
        log::trace!("emit {:?}", event);
        let Ok(mut handlers) = self.handlers.try_borrow_mut() else {
            log::warn!("Dropping re-entrant event {:?}", event);
            return;
        };
        for handler in handlers.iter_mut() {
            handler.handle_event(&event);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_handler() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let bus = EventBus::new();
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |event: &StudioEvent| seen.borrow_mut().push(event.clone())));
        }
        bus.emit(StudioEvent::CanvasCleared);

        assert_eq!(bus.handler_count(), 2);
        assert_eq!(*seen.borrow(), vec![StudioEvent::CanvasCleared, StudioEvent::CanvasCleared]);
    }
}
