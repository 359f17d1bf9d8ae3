//! Test doubles and an encounter harness shared by the integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use game_core::{
    AnimationKind, AnimationOracle, AudioSink, CombatConfig, CombatEngine, CombatEnv,
    CombatError, CombatEvent, CombatState, Combatant, CommandKind, Decision, DecisionError,
    DecisionProvider, EntityId, EventKind, ItemKind, OrderError, Roster, SoundId, StatKind, Stats,
};

/// Animation oracle whose clips finish instantly unless an entity is held.
#[derive(Debug, Default)]
pub struct Stage {
    pub played: Vec<(EntityId, AnimationKind)>,
    held: HashSet<EntityId>,
}

impl Stage {
    pub fn hold(&mut self, entity: EntityId) {
        self.held.insert(entity);
    }

    pub fn release(&mut self, entity: EntityId) {
        self.held.remove(&entity);
    }
}

impl AnimationOracle for Stage {
    fn play(&mut self, entity: EntityId, kind: AnimationKind) {
        self.played.push((entity, kind));
    }

    fn is_finished(&self, entity: EntityId) -> bool {
        !self.held.contains(&entity)
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub sounds: Vec<SoundId>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }
}

/// Returns a fixed decision per actor; unscripted actors have no option.
#[derive(Debug, Default)]
pub struct ScriptedDecisions {
    script: HashMap<EntityId, Decision>,
    pub calls: Vec<EntityId>,
}

impl ScriptedDecisions {
    pub fn set(&mut self, actor: EntityId, decision: Decision) {
        self.script.insert(actor, decision);
    }

    pub fn clear(&mut self, actor: EntityId) {
        self.script.remove(&actor);
    }
}

impl DecisionProvider for ScriptedDecisions {
    fn decide(&mut self, actor: EntityId, _roster: &Roster) -> Result<Decision, DecisionError> {
        self.calls.push(actor);
        self.script
            .get(&actor)
            .cloned()
            .ok_or(DecisionError::NoEligibleAction { actor })
    }
}

pub struct Harness {
    pub state: CombatState,
    pub stage: Stage,
    pub audio: RecordingAudio,
    pub ai: ScriptedDecisions,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(CombatConfig::default())
    }

    pub fn with_config(config: CombatConfig) -> Self {
        Self {
            state: CombatState::new(config),
            stage: Stage::default(),
            audio: RecordingAudio::default(),
            ai: ScriptedDecisions::default(),
        }
    }

    pub fn engine(&mut self) -> CombatEngine<'_> {
        let env = CombatEnv::new(&mut self.stage, &mut self.audio, &mut self.ai);
        CombatEngine::new(&mut self.state, env)
    }

    pub fn tick(&mut self, delta: f32) {
        self.engine().tick(delta).expect("tick should not fail");
    }

    pub fn ticks(&mut self, count: usize, delta: f32) {
        for _ in 0..count {
            self.tick(delta);
        }
    }

    pub fn submit(
        &mut self,
        source: EntityId,
        kind: CommandKind,
        targets: Vec<EntityId>,
    ) -> Result<(), OrderError> {
        self.engine().submit_order(source, kind, targets, None)
    }

    pub fn submit_item(&mut self, source: EntityId, item: ItemKind) -> Result<(), OrderError> {
        self.engine()
            .submit_order(source, CommandKind::UseItem, Vec::new(), Some(item))
    }

    pub fn add(&mut self, combatant: Combatant) -> EntityId {
        self.state.roster.insert(combatant)
    }

    /// Records every event of the given kinds, in dispatch order.
    pub fn record(&mut self, kinds: &[EventKind]) -> Arc<Mutex<Vec<CombatEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        self.state.events_mut().observe_many(kinds, move |event| {
            sink.lock().expect("event log poisoned").push(*event);
        });
        log
    }

    pub fn life(&self, id: EntityId) -> f32 {
        self.state.roster.get(id).map_or(0.0, |c| c.stats.life())
    }

    pub fn mana(&self, id: EntityId) -> f32 {
        self.state.roster.get(id).map_or(0.0, |c| c.stats.mana())
    }

    pub fn pending(&self, id: EntityId) -> Option<CommandKind> {
        self.state.roster.get(id).and_then(Combatant::pending_kind)
    }
}

pub fn stats(life: f32, agility: f32, physical: f32) -> Stats {
    Stats::new()
        .with(StatKind::MaxLife, life)
        .with(StatKind::Life, life)
        .with(StatKind::MaxMana, 20.0)
        .with(StatKind::Mana, 20.0)
        .with(StatKind::Agility, agility)
        .with(StatKind::PhysicalDamage, physical)
        .with(StatKind::MagicDamage, 3.0)
}

pub fn hero(name: &str, life: f32, agility: f32, physical: f32) -> Combatant {
    Combatant::new(EntityId(0), name, stats(life, agility, physical)).with_player_control(true)
}

pub fn monster(name: &str, life: f32, agility: f32, physical: f32) -> Combatant {
    Combatant::new(EntityId(0), name, stats(life, agility, physical))
}

pub fn count(log: &Arc<Mutex<Vec<CombatEvent>>>, kind: EventKind) -> usize {
    log.lock()
        .expect("event log poisoned")
        .iter()
        .filter(|e| e.kind == kind)
        .count()
}

pub fn attack(target: EntityId) -> Decision {
    Decision::new(CommandKind::Attack, vec![target])
}
