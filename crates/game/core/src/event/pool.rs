use super::{CombatEvent, EventKind};

/// Free list of event records.
///
/// Every dispatch obtains its own record, so a listener may dispatch another
/// event (of any kind) while the outer one is still being delivered.
#[derive(Debug, Default)]
pub struct EventPool {
    free: Vec<CombatEvent>,
    outstanding: usize,
}

impl EventPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a cleared record of `kind`.
    pub fn obtain(&mut self, kind: EventKind) -> CombatEvent {
        self.outstanding += 1;
        let mut event = self.free.pop().unwrap_or_default();
        event.reset(kind);
        event
    }

    pub fn release(&mut self, event: CombatEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);
        self.free.push(event);
    }

    /// Records handed out and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    pub fn idle(&self) -> usize {
        self.free.len()
    }
}
