//! Effect primitives used by command behaviors.

use tracing::{debug, warn};

use crate::buff::BuffKind;
use crate::command::CommandKind;
use crate::event::{EventKind, Subscriber};
use crate::state::{EntityId, ItemKind, ItemUse, StatKind};

use super::{CombatEngine, CombatError};

/// Raw damage before buffs and armor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    pub physical: f32,
    pub magic: f32,
}

impl Damage {
    pub fn physical(amount: f32) -> Self {
        Self {
            physical: amount,
            magic: 0.0,
        }
    }

    pub fn magic(amount: f32) -> Self {
        Self {
            physical: 0.0,
            magic: amount,
        }
    }

    pub fn total(&self) -> f32 {
        self.physical + self.magic
    }
}

impl<'a> CombatEngine<'a> {
    /// Runs the damage pipeline against one target and returns the life lost.
    ///
    /// ```text
    /// PreDamage (buffs rescale) ─► armor mitigation ─► life write ─► PostDamage
    ///                                                      │
    ///                                   crossed to zero ───┴─► death / transform order
    /// ```
    ///
    /// Targets that are missing or already down are ignored.
    pub fn deal_damage(
        &mut self,
        source: EntityId,
        target: EntityId,
        damage: Damage,
    ) -> Result<f32, CombatError> {
        if !self.state.roster.get(target).is_some_and(|c| c.is_alive()) {
            return Ok(0.0);
        }

        let incoming = self.dispatch(EventKind::PreDamage, |event| {
            event.source = Some(source);
            event.target = Some(target);
            event.physical = damage.physical;
            event.magic = damage.magic;
        });

        let Some(victim) = self.state.roster.get_mut(target) else {
            return Ok(0.0);
        };
        let physical = (incoming.physical - victim.stats.total(StatKind::PhysicalArmor)).max(0.0);
        let magic = (incoming.magic - victim.stats.total(StatKind::MagicArmor)).max(0.0);
        let before = victim.stats.life();
        victim.stats.set(StatKind::Life, before - physical - magic);
        let after = victim.stats.life();

        debug!(
            target: "combat::resolver",
            source = %source,
            victim = %target,
            physical,
            magic,
            life = after,
            "damage applied"
        );
        self.dispatch(EventKind::PostDamage, |event| {
            event.source = Some(source);
            event.target = Some(target);
            event.physical = physical;
            event.magic = magic;
            event.life = after;
        });

        if before > 0.0 && after <= 0.0 {
            self.on_downed(target)?;
        }
        Ok(before - after)
    }

    /// Restores life and mana, clamped to the target's maximums.
    pub fn heal(&mut self, source: EntityId, target: EntityId, life: f32, mana: f32) {
        if !self.state.roster.get(target).is_some_and(|c| c.is_alive()) {
            return;
        }

        let event = self.dispatch(EventKind::Heal, |event| {
            event.source = Some(source);
            event.target = Some(target);
            event.life = life;
            event.mana = mana;
        });

        if let Some(combatant) = self.state.roster.get_mut(target) {
            combatant.stats.add(StatKind::Life, event.life);
            combatant.stats.add(StatKind::Mana, event.mana);
        }
    }

    /// Attaches a buff, or resets the holder's existing buff of that kind.
    pub fn attach_buff(&mut self, target: EntityId, kind: BuffKind) -> Result<(), CombatError> {
        let Some(holder) = self.state.roster.get_mut(target) else {
            return Ok(());
        };
        if let Some(existing) = holder.buffs_mut().get_mut(kind) {
            existing.reset();
            debug!(target: "combat::buffs", holder = %target, kind = %kind, "buff refreshed");
            return Ok(());
        }

        let mut buff = self.state.buffs.obtain(kind, target)?;
        buff.behavior_mut().on_add(target, &mut *self.env.audio);

        let subscriber = Subscriber::Buff {
            holder: target,
            kind,
        };
        for &event in buff.subscriptions() {
            self.state.events.subscribe(event, subscriber);
        }

        let inserted = match self.state.roster.get_mut(target) {
            Some(holder) => holder.buffs_mut().insert(buff),
            None => Err(buff),
        };
        if let Err(buff) = inserted {
            warn!(target: "combat::buffs", holder = %target, kind = %kind, "buff slots exhausted");
            self.state.events.unsubscribe(subscriber);
            self.state.buffs.release(buff);
            return Ok(());
        }

        self.dispatch(EventKind::BuffAdded, |event| {
            event.target = Some(target);
            event.buff = Some(kind);
        });
        Ok(())
    }

    /// Tears down every buff whose behavior reports finished.
    pub fn expire_buffs(&mut self) {
        let finished: Vec<(EntityId, BuffKind)> = self
            .state
            .roster
            .iter()
            .flat_map(|c| c.buffs().finished().into_iter().map(move |kind| (c.id, kind)))
            .collect();

        for (holder, kind) in finished {
            let Some(mut buff) = self
                .state
                .roster
                .get_mut(holder)
                .and_then(|c| c.buffs_mut().remove(kind))
            else {
                continue;
            };
            self.state.events.unsubscribe(Subscriber::Buff { holder, kind });
            buff.behavior_mut().on_remove(holder, &mut *self.env.audio);
            self.state.buffs.release(buff);

            debug!(target: "combat::buffs", holder = %holder, kind = %kind, "buff expired");
            self.dispatch(EventKind::BuffRemoved, |event| {
                event.target = Some(holder);
                event.buff = Some(kind);
            });
        }
    }

    /// Entity removal sink: takes a combatant out of every iteration set.
    pub fn remove_combatant(&mut self, id: EntityId) {
        let Some(mut combatant) = self.state.roster.remove(id) else {
            return;
        };

        if let Some(command) = combatant.take_pending() {
            self.state.commands.release(command);
        }
        let buffs: Vec<_> = combatant.buffs_mut().drain().collect();
        for mut buff in buffs {
            let kind = buff.kind();
            self.state.events.unsubscribe(Subscriber::Buff { holder: id, kind });
            buff.behavior_mut().on_remove(id, &mut *self.env.audio);
            self.state.buffs.release(buff);
        }
        self.discard_deferred(id);

        let turn = &mut self.state.turn;
        turn.order.retain(|&entity| entity != id);
        if turn.in_flight.as_ref().is_some_and(|f| f.source == id) {
            turn.in_flight = None;
        }

        debug!(target: "combat::resolver", entity = %id, name = %combatant.name, "combatant removed");
        self.dispatch(EventKind::Removed, |event| event.target = Some(id));
    }

    /// Queues an item for the session's consume mechanism.
    pub fn queue_item_use(&mut self, source: EntityId, item: ItemKind) {
        self.state.consumptions.push(ItemUse { source, item });
        self.dispatch(EventKind::ItemConsumed, |event| {
            event.source = Some(source);
            event.item = Some(item);
            event.command = Some(CommandKind::UseItem);
        });
    }
}
