//! Encounter session: owns the combat state and its collaborators.
//!
//! The session is the single owner of the roster while an encounter runs.
//! Each [`EncounterSession::tick`] lends the state, the headless stage, the
//! audio sink and the AI provider to a short-lived
//! [`game_core::CombatEngine`], then applies the item consumptions the tick
//! queued.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use game_content::{EncounterSpec, ItemCatalog};
use game_core::{
    BuffKind, CombatConfig, CombatEngine, CombatEnv, CombatEvent, CombatState, Combatant,
    CommandKind, DecisionProvider, EntityId, EventKind, ItemKind, ItemUse, ObserverId, Outcome,
    Roster, StatKind, TurnPhase,
};

use crate::api::{PlayerOrder, Result, RuntimeError};
use crate::inventory::Inventory;
use crate::presentation::{LogAudio, ScriptedStage};
use crate::providers::CategoryAi;
use crate::repository::SaveData;

/// Read-only view of one combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub name: String,
    pub player_controlled: bool,
    pub life: f32,
    pub max_life: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub agility: f32,
    pub phases: u8,
    pub learned: Vec<CommandKind>,
    pub pending: Option<CommandKind>,
    pub buffs: Vec<BuffKind>,
}

impl CombatantView {
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    pub fn life_ratio(&self) -> f32 {
        if self.max_life > 0.0 {
            self.life / self.max_life
        } else {
            0.0
        }
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.contains(&kind)
    }
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            name: combatant.name.clone(),
            player_controlled: combatant.player_controlled,
            life: combatant.stats.life(),
            max_life: combatant.stats.total(StatKind::MaxLife),
            mana: combatant.stats.mana(),
            max_mana: combatant.stats.total(StatKind::MaxMana),
            agility: combatant.agility(),
            phases: combatant.phases,
            learned: combatant.learned.clone(),
            pending: combatant.pending_kind(),
            buffs: combatant.buffs().iter().map(|b| b.kind()).collect(),
        }
    }
}

/// Point-in-time copy of an encounter for frontends and providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub round: u32,
    pub phase: TurnPhase,
    pub outcome: Option<Outcome>,
    pub elapsed: f32,
    /// Combatants in roster order.
    pub combatants: Vec<CombatantView>,
    /// Party members the resolver is waiting on.
    pub awaiting: Vec<EntityId>,
}

impl SessionSnapshot {
    pub fn get(&self, id: EntityId) -> Option<&CombatantView> {
        self.combatants.iter().find(|c| c.id == id)
    }
}

/// What one tick changed outside the combat core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Consumptions applied, with the stack size left afterwards.
    pub items_used: Vec<(ItemUse, u32)>,
    /// Set on the tick the encounter ended.
    pub ended: Option<Outcome>,
}

/// One encounter and everything needed to resolve it.
pub struct EncounterSession {
    state: CombatState,
    stage: ScriptedStage,
    audio: LogAudio,
    ai: Box<dyn DecisionProvider + Send>,
    inventory: Inventory,
    catalog: ItemCatalog,
    hero: Option<EntityId>,
    dungeon_level: u32,
    elapsed: f32,
}

impl EncounterSession {
    /// Spawns the encounter's roster with the built-in item catalog.
    pub fn new(spec: &EncounterSpec, config: CombatConfig) -> Self {
        Self::from_roster(spec.build_roster(), config).with_dungeon_level(spec.dungeon_level)
    }

    /// Wraps a roster prepared by the caller. The first party member is
    /// the hero: it wears the inventory's gear and is captured by saves.
    pub fn from_roster(roster: Roster, config: CombatConfig) -> Self {
        let hero = roster.party().next().map(|c| c.id);
        Self {
            state: CombatState::new(config).with_roster(roster),
            stage: ScriptedStage::new(),
            audio: LogAudio::new(),
            ai: Box::new(CategoryAi::new()),
            inventory: Inventory::new(),
            catalog: ItemCatalog::builtin(),
            hero,
            dungeon_level: 0,
            elapsed: 0.0,
        }
    }

    #[must_use]
    pub fn with_dungeon_level(mut self, level: u32) -> Self {
        self.dungeon_level = level;
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: ScriptedStage) -> Self {
        self.stage = stage;
        self
    }

    #[must_use]
    pub fn with_decision_provider(mut self, ai: impl DecisionProvider + Send + 'static) -> Self {
        self.ai = Box::new(ai);
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: ItemCatalog) -> Self {
        self.catalog = catalog;
        self.refresh_gear();
        self
    }

    #[must_use]
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self.refresh_gear();
        self
    }

    /// Restores a saved hero into the first party slot, along with the
    /// party inventory.
    pub fn restore(&mut self, save: &SaveData) -> Result<()> {
        let hero = self.hero.ok_or(RuntimeError::NoHero)?;
        let combatant = self
            .state
            .roster
            .get_mut(hero)
            .ok_or(RuntimeError::NoHero)?;
        save.apply_to(combatant)?;
        self.inventory = save.inventory();
        self.dungeon_level = save.dungeon_level;
        self.refresh_gear();
        if let Some(combatant) = self.state.roster.get_mut(hero) {
            save.restore_resources(&mut combatant.stats);
        }
        Ok(())
    }

    /// Captures the hero and the inventory for persistence.
    pub fn save_data(&self) -> Result<SaveData> {
        let hero = self
            .hero
            .and_then(|id| self.state.roster.get(id))
            .ok_or(RuntimeError::NoHero)?;
        Ok(SaveData::capture(self.dungeon_level, &self.inventory, hero))
    }

    /// Advances the stage and the resolver by `delta` seconds, then applies
    /// queued item consumptions.
    pub fn tick(&mut self, delta: f32) -> Result<TickReport> {
        let was_over = self.state.turn.is_over();

        self.stage.advance(delta);
        let env = CombatEnv::new(&mut self.stage, &mut self.audio, self.ai.as_mut());
        CombatEngine::new(&mut self.state, env).tick(delta)?;
        self.elapsed += delta;

        let mut report = TickReport::default();
        for item_use in self.state.take_consumptions() {
            if let Some(remaining) = self.apply_consumption(item_use) {
                report.items_used.push((item_use, remaining));
            }
        }

        if !was_over && let Some(outcome) = self.state.turn.outcome {
            info!(
                target: "runtime::session",
                outcome = %outcome,
                round = self.state.turn.round,
                elapsed = self.elapsed,
                "encounter ended"
            );
            report.ended = Some(outcome);
        }
        Ok(report)
    }

    fn apply_consumption(&mut self, item_use: ItemUse) -> Option<u32> {
        let ItemUse { source, item } = item_use;
        // A source that left the encounter keeps its item in the bag.
        if !self.state.roster.contains(source) {
            warn!(
                target: "runtime::session",
                source = %source,
                item = %item,
                "item user left the encounter, item kept"
            );
            return None;
        }
        let (life, mana, remaining) = match self.inventory.consume(item, &self.catalog) {
            Ok(restored) => restored,
            Err(err) => {
                warn!(
                    target: "runtime::session",
                    source = %source,
                    item = %item,
                    error = %err,
                    "queued item could not be consumed"
                );
                return None;
            }
        };

        if let Some(combatant) = self.state.roster.get_mut(source)
            && combatant.is_alive()
        {
            combatant.stats.add(StatKind::Life, life);
            combatant.stats.add(StatKind::Mana, mana);
        }
        debug!(target: "runtime::session", source = %source, item = %item, life, mana, "item applied");
        Some(remaining)
    }

    /// Forwards a player order to the resolver.
    ///
    /// Item orders are checked against the inventory first; the item is only
    /// spent once the command runs.
    pub fn submit_order(&mut self, order: PlayerOrder) -> Result<()> {
        if let Some(item) = order.item {
            self.check_item(item)?;
        }

        let env = CombatEnv::new(&mut self.stage, &mut self.audio, self.ai.as_mut());
        CombatEngine::new(&mut self.state, env).submit_order(
            order.source,
            order.kind,
            order.targets,
            order.item,
        )?;
        Ok(())
    }

    fn check_item(&self, item: ItemKind) -> Result<()> {
        let reserved = self
            .state
            .roster
            .iter()
            .filter_map(|c| c.pending())
            .chain(self.state.deferred_orders())
            .filter(|c| c.item() == Some(item))
            .count() as u32;
        if self.inventory.amount(item) <= reserved {
            return Err(crate::inventory::InventoryError::Missing(item).into());
        }
        Ok(())
    }

    /// Equips a piece of gear on the hero.
    pub fn equip(&mut self, item: ItemKind) -> Result<()> {
        self.inventory.equip(item, &self.catalog)?;
        self.refresh_gear();
        Ok(())
    }

    pub fn unequip(&mut self, item: ItemKind) -> Result<()> {
        self.inventory.unequip(item)?;
        self.refresh_gear();
        Ok(())
    }

    fn refresh_gear(&mut self) {
        let Some(hero) = self.hero.and_then(|id| self.state.roster.get_mut(id)) else {
            return;
        };
        self.inventory.apply_gear(&mut hero.stats, &self.catalog);
    }

    /// Registers an observer for the given event kinds.
    pub fn observe<F>(&mut self, kinds: &[EventKind], observer: F) -> ObserverId
    where
        F: FnMut(&CombatEvent) + Send + 'static,
    {
        self.state.events_mut().observe_many(kinds, observer)
    }

    pub fn forget(&mut self, id: ObserverId) {
        self.state.events_mut().forget(id);
    }

    /// Live party members the resolver is waiting on.
    pub fn awaiting_orders(&self) -> Vec<EntityId> {
        if self.state.turn.phase != TurnPhase::WaitForPlayerOrder || self.is_over() {
            return Vec::new();
        }
        self.state
            .roster
            .party()
            .filter(|c| c.is_alive() && !c.has_pending())
            .map(|c| c.id)
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let turn = &self.state.turn;
        SessionSnapshot {
            round: turn.round,
            phase: turn.phase,
            outcome: turn.outcome,
            elapsed: self.elapsed,
            combatants: self.state.roster.iter().map(CombatantView::from).collect(),
            awaiting: self.awaiting_orders(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.turn.is_over()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.turn.outcome
    }

    pub fn hero(&self) -> Option<EntityId> {
        self.hero
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn audio(&self) -> &LogAudio {
        &self.audio
    }

    pub fn dungeon_level(&self) -> u32 {
        self.dungeon_level
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
