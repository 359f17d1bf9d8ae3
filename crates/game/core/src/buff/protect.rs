use crate::env::{AudioSink, SoundId};
use crate::event::{CombatEvent, EventKind};
use crate::state::EntityId;

use super::BuffBehavior;

/// Scales physical damage aimed at the holder for a fixed number of hits.
#[derive(Clone, Debug)]
pub struct ProtectBuff {
    initial: u32,
    remaining: u32,
    multiplier: f32,
}

impl ProtectBuff {
    pub fn new(charges: u32, multiplier: f32) -> Self {
        Self {
            initial: charges,
            remaining: charges,
            multiplier,
        }
    }
}

impl BuffBehavior for ProtectBuff {
    fn subscriptions(&self) -> &'static [EventKind] {
        &[EventKind::PreDamage]
    }

    fn on_add(&mut self, _holder: EntityId, audio: &mut dyn AudioSink) {
        audio.play(SoundId::Protect);
    }

    fn on_event(&mut self, holder: EntityId, event: &mut CombatEvent) {
        if event.kind != EventKind::PreDamage || !event.targets(holder) || self.remaining == 0 {
            return;
        }
        event.physical *= self.multiplier;
        self.remaining -= 1;
    }

    fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    fn reset(&mut self) {
        self.remaining = self.initial;
    }

    fn counter(&self) -> u32 {
        self.remaining
    }
}
