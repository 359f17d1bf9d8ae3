//! Encounter fixtures shared by the runtime integration tests.
#![allow(dead_code)]

use game_core::{CombatConfig, CombatantTemplate, CommandKind, Roster, StatKind};
use runtime::EncounterSession;

pub fn template(name: &str, player: bool, life: f32, agility: f32, damage: f32) -> CombatantTemplate {
    let mut template = CombatantTemplate::new(
        name,
        vec![
            (StatKind::MaxLife, 40.0),
            (StatKind::Life, life),
            (StatKind::MaxMana, 10.0),
            (StatKind::Mana, 10.0),
            (StatKind::Agility, agility),
            (StatKind::PhysicalDamage, damage),
        ],
    );
    template.player_controlled = player;
    template
}

/// Hero (agility 10) against a harmless rat (agility 1).
pub fn training_roster(hero_life: f32) -> Roster {
    let mut hero = template("Hero", true, hero_life, 10.0, 8.0);
    hero.learned = vec![CommandKind::Attack, CommandKind::Defend, CommandKind::UseItem];

    let mut roster = Roster::new();
    roster.spawn(&hero);
    roster.spawn(&template("Rat", false, 40.0, 1.0, 0.0));
    roster
}

/// Two fighters against two monsters that actually hit back.
pub fn skirmish_roster() -> Roster {
    let mut roster = Roster::new();
    roster.spawn(&template("Knight", true, 40.0, 6.0, 9.0));
    roster.spawn(&template("Squire", true, 30.0, 4.0, 5.0));
    roster.spawn(&template("Goblin", false, 25.0, 5.0, 6.0));
    roster.spawn(&template("Wolf", false, 20.0, 8.0, 4.0));
    roster
}

pub fn session(roster: Roster) -> EncounterSession {
    EncounterSession::from_roster(roster, CombatConfig::default())
}
