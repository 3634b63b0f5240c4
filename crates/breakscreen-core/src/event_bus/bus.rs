//! Event bus implementation.
//!
//! The designer runs on a single thread, so the bus is a plain synchronous
//! fan-out: `publish` invokes every matching handler before it returns.
//! Handlers are stored behind `Rc` and snapshotted before dispatch, so a
//! handler may subscribe or unsubscribe re-entrantly without poisoning the
//! borrow.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;

use super::events::{DesignerEvent, EventCategory};

/// Subscription handle for unsubscribing from events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter.
    pub fn matches(&self, event: &DesignerEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Rc<dyn Fn(&DesignerEvent)>;

#[derive(Default)]
struct BusInner {
    handlers: HashMap<SubscriptionId, (EventFilter, EventHandler)>,
}

/// Central event bus for designer notifications.
///
/// The handle is cheap to clone; clones publish to and subscribe on the
/// same underlying handler table.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    /// Creates a new, empty event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for events matching `filter`.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&DesignerEvent) + 'static,
    {
        let id = SubscriptionId::new();
        self.inner
            .borrow_mut()
            .handlers
            .insert(id, (filter, Rc::new(handler)));
        id
    }

    /// Removes a subscription. Returns `true` if it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.inner.borrow_mut().handlers.remove(&id).is_some();
        if !removed {
            tracing::debug!(subscription = %id, "unsubscribe for unknown subscription");
        }
        removed
    }

    /// Publishes an event to all matching subscribers and returns how many
    /// handlers ran.
    pub fn publish(&self, event: DesignerEvent) -> usize {
        // Snapshot matching handlers so re-entrant (un)subscription inside
        // a handler does not hold the borrow open.
        let matching: Vec<EventHandler> = {
            let inner = self.inner.borrow();
            inner
                .handlers
                .values()
                .filter(|(filter, _)| filter.matches(&event))
                .map(|(_, handler)| Rc::clone(handler))
                .collect()
        };

        for handler in &matching {
            handler(&event);
        }
        matching.len()
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribe_and_publish() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        bus.subscribe(EventFilter::All, move |_| c.set(c.get() + 1));

        let delivered = bus.publish(DesignerEvent::WidgetAdded {
            id: "widget-1".to_string(),
        });
        assert_eq!(delivered, 1);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_category_filter() {
        let bus = EventBus::new();
        let selections = Rc::new(Cell::new(0));

        let s = Rc::clone(&selections);
        bus.subscribe(
            EventFilter::Categories(vec![EventCategory::Selection]),
            move |_| s.set(s.get() + 1),
        );

        bus.publish(DesignerEvent::SelectionChanged { ids: vec![] });
        bus.publish(DesignerEvent::WidgetAdded {
            id: "widget-2".to_string(),
        });
        assert_eq!(selections.get(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventBus::new();
        let id = bus.subscribe(EventFilter::All, |_| {});
        assert_eq!(bus.subscriber_count(), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_reentrant_unsubscribe_does_not_panic() {
        let bus = EventBus::new();
        let bus2 = bus.clone();
        let slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));
        let slot2 = Rc::clone(&slot);

        let id = bus.subscribe(EventFilter::All, move |_| {
            if let Some(id) = slot2.take() {
                bus2.unsubscribe(id);
            }
        });
        slot.set(Some(id));

        bus.publish(DesignerEvent::SelectionChanged { ids: vec![] });
        assert_eq!(bus.subscriber_count(), 0);
    }
}
