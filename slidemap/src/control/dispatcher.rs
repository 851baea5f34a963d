use crate::control::{EventHandler, EventKind, EventPropagation, MapEvent};
use crate::engine::MapEngine;

struct Registration {
    kind: EventKind,
    layer: Option<String>,
    handler: Box<dyn EventHandler>,
}

impl Registration {
    fn accepts(&self, event: &MapEvent) -> bool {
        self.kind == event.kind()
            && match &self.layer {
                Some(layer) => event.layer() == Some(layer.as_str()),
                None => true,
            }
    }
}

/// Calls registered handlers for incoming map events.
///
/// Handlers are called in registration order until one of them returns [`EventPropagation::Stop`]. A handler
/// registered with a layer only receives events of that layer. A handler without a layer receives all events of
/// its kind.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Registration>,
}

impl EventDispatcher {
    /// Adds a handler for the given event kind.
    pub fn add_handler(
        &mut self,
        kind: EventKind,
        layer: Option<&str>,
        handler: impl EventHandler + 'static,
    ) {
        self.handlers.push(Registration {
            kind,
            layer: layer.map(str::to_string),
            handler: Box::new(handler),
        });
    }

    /// Passes the event to the handlers. Returns the number of handlers that were called.
    pub fn dispatch(&self, event: &MapEvent, engine: &mut dyn MapEngine) -> usize {
        let mut called = 0;
        for registration in self.handlers.iter().filter(|r| r.accepts(event)) {
            called += 1;
            if (registration.handler)(event, &mut *engine) == EventPropagation::Stop {
                break;
            }
        }

        called
    }

    /// Number of handlers registered for the event kind and layer.
    pub fn handler_count(&self, kind: EventKind, layer: Option<&str>) -> usize {
        self.handlers
            .iter()
            .filter(|r| r.kind == kind && r.layer.as_deref() == layer)
            .count()
    }

    /// Total number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::config::{CameraOptions, MapConfig};
    use crate::control::Cursor;
    use crate::engine::HeadlessEngine;

    fn engine() -> HeadlessEngine {
        HeadlessEngine::new(&MapConfig::default().container, &CameraOptions::default())
    }

    fn enter(layer: &str) -> MapEvent {
        MapEvent::MouseEnter {
            layer: layer.into(),
        }
    }

    #[test]
    fn layer_scope() {
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(EventKind::MouseEnter, Some("landslides"), |_, engine| {
            engine.set_cursor(Cursor::Pointer);
            EventPropagation::Propagate
        });

        let mut engine = engine();
        assert_eq!(dispatcher.dispatch(&enter("counties-outline"), &mut engine), 0);
        assert_eq!(engine.cursor(), Cursor::Default);

        assert_eq!(dispatcher.dispatch(&enter("landslides"), &mut engine), 1);
        assert_eq!(engine.cursor(), Cursor::Pointer);

        assert_eq!(dispatcher.dispatch(&MapEvent::Move, &mut engine), 0);
    }

    #[test]
    fn stop_propagation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::default();

        let first = calls.clone();
        dispatcher.add_handler(EventKind::Move, None, move |_, _| {
            first.fetch_add(1, Ordering::Relaxed);
            EventPropagation::Stop
        });
        let second = calls.clone();
        dispatcher.add_handler(EventKind::Move, None, move |_, _| {
            second.fetch_add(10, Ordering::Relaxed);
            EventPropagation::Propagate
        });

        assert_eq!(dispatcher.dispatch(&MapEvent::Move, &mut engine()), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(dispatcher.len(), 2);
        assert_eq!(dispatcher.handler_count(EventKind::Move, None), 2);
        assert_eq!(dispatcher.handler_count(EventKind::Move, Some("landslides")), 0);
    }

    #[test]
    fn unscoped_handler_receives_layer_events() {
        let mut dispatcher = EventDispatcher::default();
        dispatcher.add_handler(EventKind::MouseEnter, None, |_, _| {
            EventPropagation::Propagate
        });

        assert_eq!(dispatcher.dispatch(&enter("anything"), &mut engine()), 1);
    }
}
