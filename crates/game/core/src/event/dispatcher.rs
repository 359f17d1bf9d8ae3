//! Listener registry keyed by event kind.

use std::collections::HashMap;

use tracing::trace;

use crate::buff::BuffKind;
use crate::state::EntityId;

use super::{CombatEvent, EventKind, EventPool};

/// Handle returned by [`EventDispatcher::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u32);

/// External read-only listener.
pub type Observer = Box<dyn FnMut(&CombatEvent) + Send>;

/// A registered listener.
///
/// Buffs and the termination check need mutable access to the encounter,
/// so they are registered by identity and routed by the engine. Observers
/// only see the finished event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subscriber {
    /// The buff of `kind` held by `holder`.
    Buff { holder: EntityId, kind: BuffKind },
    /// Victory/defeat detection.
    Termination,
    Observer(ObserverId),
}

/// Publish/subscribe registry for one encounter.
///
/// Subscribing the same listener twice to the same kind registers it twice;
/// callers de-duplicate if they need to.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: HashMap<EventKind, Vec<Subscriber>>,
    observers: HashMap<ObserverId, Observer>,
    next_observer: u32,
    pool: EventPool,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) {
        trace!(target: "combat::events", kind = %kind, subscriber = ?subscriber, "subscribe");
        self.listeners.entry(kind).or_default().push(subscriber);
    }

    /// Removes every registration of `subscriber`, across all kinds.
    pub fn unsubscribe(&mut self, subscriber: Subscriber) {
        for registered in self.listeners.values_mut() {
            registered.retain(|s| *s != subscriber);
        }
        if let Subscriber::Observer(id) = subscriber {
            self.observers.remove(&id);
        }
    }

    /// Registers an external observer for one event kind.
    pub fn observe<F>(&mut self, kind: EventKind, observer: F) -> ObserverId
    where
        F: FnMut(&CombatEvent) + Send + 'static,
    {
        self.observe_many(&[kind], observer)
    }

    /// Registers one observer for several event kinds.
    pub fn observe_many<F>(&mut self, kinds: &[EventKind], observer: F) -> ObserverId
    where
        F: FnMut(&CombatEvent) + Send + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, Box::new(observer));
        for &kind in kinds {
            self.subscribe(kind, Subscriber::Observer(id));
        }
        id
    }

    /// Drops an observer and all of its registrations.
    pub fn forget(&mut self, id: ObserverId) {
        self.unsubscribe(Subscriber::Observer(id));
    }

    /// Snapshot of the listeners for `kind`, in registration order.
    pub fn listeners(&self, kind: EventKind) -> Vec<Subscriber> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_subscribed(&self, kind: EventKind, subscriber: Subscriber) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|registered| registered.contains(&subscriber))
    }

    pub(crate) fn notify(&mut self, id: ObserverId, event: &CombatEvent) {
        if let Some(observer) = self.observers.get_mut(&id) {
            observer(event);
        }
    }

    pub(crate) fn pool_mut(&mut self) -> &mut EventPool {
        &mut self.pool
    }

    pub fn pool(&self) -> &EventPool {
        &self.pool
    }
}

impl core::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners)
            .field("observers", &self.observers.len())
            .field("pool", &self.pool)
            .finish()
    }
}
