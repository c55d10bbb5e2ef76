// ABOUTME: Single-threaded publish-subscribe hub for control events
// ABOUTME: Delivers synchronously on the engine thread; tolerant of reentrant publishes

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{trace, warn};

use crate::control::ControlEvent;

/// Subscription identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

type Handler = Rc<RefCell<dyn FnMut(&ControlEvent)>>;

#[derive(Default)]
struct HubInner {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(SubscriptionId, Handler)>>,
}

/// Host-side event hub shared by the control and the engine callback object.
///
/// Cloning yields another handle to the same subscriber list. Handlers run
/// synchronously inside the publishing call, so they must not block.
#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<HubInner>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to every control event
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ControlEvent) + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        let handler: Handler = Rc::new(RefCell::new(callback));
        self.inner.handlers.borrow_mut().push((id, handler));
        id
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.inner.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }

    /// Deliver an event to every current subscriber, in subscription order.
    ///
    /// The subscriber list is snapshotted first so handlers may subscribe or
    /// unsubscribe while being notified. A handler that is already running
    /// further up the stack is skipped for the nested event.
    pub fn publish(&self, event: &ControlEvent) {
        let snapshot: Vec<(SubscriptionId, Handler)> = self.inner.handlers.borrow().clone();
        trace!(event = ?event, subscribers = snapshot.len(), "Publishing control event");

        for (id, handler) in snapshot {
            match handler.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => warn!(
                    subscription = id.0,
                    event = ?event,
                    "Skipping reentrant delivery to a handler that is still running"
                ),
            }
        }
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineEvent, EngineEventKind};

    #[test]
    fn test_publish_reaches_all_subscribers_in_order() {
        let hub = EventHub::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            hub.subscribe(move |event| {
                log.borrow_mut().push((tag, event.clone()));
            });
        }

        hub.publish(&ControlEvent::Ready { epoch: 1 });

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, "first");
        assert_eq!(log[1].0, "second");
        assert_eq!(log[1].1, ControlEvent::Ready { epoch: 1 });
    }

    #[test]
    fn test_unsubscribe() {
        let hub = EventHub::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = hub.subscribe(move |_| counter.set(counter.get() + 1));

        hub.publish(&ControlEvent::Ready { epoch: 1 });
        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.publish(&ControlEvent::Ready { epoch: 2 });

        assert_eq!(count.get(), 1);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_subscribe_during_publish() {
        let hub = EventHub::new();
        let inner_hub = hub.clone();
        let added = Rc::new(Cell::new(false));
        let flag = Rc::clone(&added);

        hub.subscribe(move |_| {
            if !flag.get() {
                flag.set(true);
                inner_hub.subscribe(|_| {});
            }
        });

        hub.publish(&ControlEvent::Ready { epoch: 1 });
        assert!(added.get());
        assert_eq!(hub.subscriber_count(), 2);
    }

    #[test]
    fn test_reentrant_publish_skips_running_handler() {
        let hub = EventHub::new();
        let inner_hub = hub.clone();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_by_handler = Rc::clone(&seen);

        hub.subscribe(move |event| {
            seen_by_handler.borrow_mut().push(event.engine_kind());
            if event.engine_kind() == Some(EngineEventKind::Change) {
                // Nested publish from inside a handler, as an engine upcall would
                inner_hub.publish(&EngineEvent::bare(EngineEventKind::ChangeFold).into());
            }
        });

        hub.publish(&EngineEvent::bare(EngineEventKind::Change).into());
        assert_eq!(*seen.borrow(), vec![Some(EngineEventKind::Change)]);
    }
}
