//! Typed event dispatch.
//!
//! Replaces implicit global event-bus wiring with an explicit dispatch table:
//! handlers are registered against an event kind at startup, and the host (or
//! its transport bridge) hands events to [`EventDispatcher::dispatch`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use record_search_shared::ChangeEvent;

/// The event kind the host emits after every successful resource mutation.
pub const RESOURCE_CHANGED: &str = "resource.changed";

/// A handler reacting to change events.
///
/// Handlers are fire-and-forget: they return nothing, and any failure must be
/// contained internally. The primary-store mutation behind the event has
/// already committed and cannot be rolled back or blocked from here.
#[async_trait]
pub trait ChangeHandler: Send + Sync {
    /// React to a single change event.
    async fn handle(&self, event: &ChangeEvent);
}

/// Dispatch table mapping event kinds to registered handlers.
///
/// Populated once at startup, then only read; events with no registered kind
/// are dropped silently.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn ChangeHandler>>>,
}

impl EventDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an event kind.
    ///
    /// Handlers for the same kind run in registration order.
    pub fn register(&mut self, kind: impl Into<String>, handler: Arc<dyn ChangeHandler>) {
        self.handlers.entry(kind.into()).or_default().push(handler);
    }

    /// Dispatch an event to every handler registered for `kind`.
    ///
    /// Each event is processed synchronously end-to-end by the task that
    /// received it; there is no internal queueing.
    pub async fn dispatch(&self, kind: &str, event: &ChangeEvent) {
        match self.handlers.get(kind) {
            Some(handlers) => {
                for handler in handlers {
                    handler.handle(event).await;
                }
            }
            None => {
                debug!(kind = %kind, "No handler registered for event kind, dropping");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_search_shared::{ChangeAction, RecordLocator};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ChangeHandler for CountingHandler {
        async fn handle(&self, _event: &ChangeEvent) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn event() -> ChangeEvent {
        ChangeEvent {
            resource_kind: "record".to_string(),
            locator: RecordLocator::new("default", "articles"),
            action: ChangeAction::Create,
            impacted: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_to_registered_handler() {
        let handler = Arc::new(CountingHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(RESOURCE_CHANGED, handler.clone());

        dispatcher.dispatch(RESOURCE_CHANGED, &event()).await;
        dispatcher.dispatch(RESOURCE_CHANGED, &event()).await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unknown_kind_dropped() {
        let handler = Arc::new(CountingHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(RESOURCE_CHANGED, handler.clone());

        dispatcher.dispatch("resource.read", &event()).await;

        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_multiple_handlers_same_kind() {
        let first = Arc::new(CountingHandler::new());
        let second = Arc::new(CountingHandler::new());
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(RESOURCE_CHANGED, first.clone());
        dispatcher.register(RESOURCE_CHANGED, second.clone());

        dispatcher.dispatch(RESOURCE_CHANGED, &event()).await;

        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }
}
