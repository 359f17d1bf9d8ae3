//! Encounter roster: the stat-mutation and entity-removal sink.

use super::{Combatant, CombatantTemplate, EntityId, StatKind};

/// Combatants taking part in one encounter, in insertion order.
///
/// The roster is owned by the session and lent to the resolver for the
/// duration of a tick. Stat writes go through [`super::Stats::set`] and
/// therefore clamp life and mana.
#[derive(Debug, Default)]
pub struct Roster {
    combatants: Vec<Combatant>,
    next_id: u32,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a combatant from a template and returns its fresh id.
    pub fn spawn(&mut self, template: &CombatantTemplate) -> EntityId {
        let id = self.allocate_id();
        self.combatants.push(Combatant::from_template(id, template));
        id
    }

    /// Inserts a prepared combatant under a fresh id and returns it.
    pub fn insert(&mut self, mut combatant: Combatant) -> EntityId {
        let id = self.allocate_id();
        combatant.id = id;
        self.combatants.push(combatant);
        id
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.combatants.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Player-controlled combatants.
    pub fn party(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.player_controlled)
    }

    /// AI-controlled combatants.
    pub fn opponents(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| !c.player_controlled)
    }

    /// Living combatants on the opposite side of `id`.
    pub fn living_enemies_of(&self, id: EntityId) -> impl Iterator<Item = &Combatant> {
        let side = self.get(id).map(|c| c.player_controlled);
        self.combatants
            .iter()
            .filter(move |c| Some(!c.player_controlled) == side && c.is_alive())
    }

    /// Living combatants on the same side as `id`, including itself.
    pub fn living_allies_of(&self, id: EntityId) -> impl Iterator<Item = &Combatant> {
        let side = self.get(id).map(|c| c.player_controlled);
        self.combatants
            .iter()
            .filter(move |c| Some(c.player_controlled) == side && c.is_alive())
    }

    pub fn stat(&self, id: EntityId, kind: StatKind) -> Option<f32> {
        self.get(id).map(|c| c.stats.total(kind))
    }

    /// Writes a base stat. Returns false if the combatant is unknown.
    pub fn set_stat(&mut self, id: EntityId, kind: StatKind, value: f32) -> bool {
        match self.get_mut(id) {
            Some(combatant) => {
                combatant.stats.set(kind, value);
                true
            }
            None => false,
        }
    }

    /// Removes a combatant from the encounter, returning its record.
    pub fn remove(&mut self, id: EntityId) -> Option<Combatant> {
        let index = self.combatants.iter().position(|c| c.id == id)?;
        Some(self.combatants.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(name: &str, player: bool) -> CombatantTemplate {
        let mut template = CombatantTemplate::new(
            name,
            vec![(StatKind::MaxLife, 10.0), (StatKind::Life, 10.0)],
        );
        template.player_controlled = player;
        template
    }

    #[test]
    fn spawn_assigns_increasing_ids() {
        let mut roster = Roster::new();
        let a = roster.spawn(&template("a", true));
        let b = roster.spawn(&template("b", false));
        assert_eq!(a, EntityId(0));
        assert_eq!(b, EntityId(1));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut roster = Roster::new();
        let a = roster.spawn(&template("a", true));
        assert!(roster.remove(a).is_some());
        let b = roster.spawn(&template("b", true));
        assert_ne!(a, b);
        assert!(!roster.contains(a));
    }

    #[test]
    fn sides_are_split_by_control() {
        let mut roster = Roster::new();
        let hero = roster.spawn(&template("hero", true));
        let rat = roster.spawn(&template("rat", false));
        roster.set_stat(rat, StatKind::Life, 0.0);
        roster.spawn(&template("bat", false));

        let enemies: Vec<_> = roster.living_enemies_of(hero).map(|c| c.name.as_str()).collect();
        assert_eq!(enemies, vec!["bat"]);
        assert_eq!(roster.living_allies_of(hero).count(), 1);
        assert_eq!(roster.opponents().count(), 2);
    }
}
