//! Combatant stat sheet.
//!
//! Stats are split into two layers:
//! - **Base**: Intrinsic values, persisted with the character
//! - **Bonus**: Gear and other external modifiers, written by the session
//!
//! `total = base + bonus` for every stat except the current resources
//! (life, mana) which have no bonus layer. Resources are clamped to
//! `[0, total max]` on every write, including writes to the max stats.

use strum::{EnumCount, IntoEnumIterator};

/// Kinds of numeric stats a combatant carries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Life,
    MaxLife,
    Mana,
    MaxMana,
    Strength,
    Agility,
    Intelligence,
    PhysicalDamage,
    MagicDamage,
    PhysicalArmor,
    MagicArmor,
}

impl StatKind {
    /// Returns true for current resource pools (life, mana).
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::Life | Self::Mana)
    }

    /// Returns the maximum stat bounding a resource pool.
    pub const fn maximum(self) -> Option<StatKind> {
        match self {
            Self::Life => Some(Self::MaxLife),
            Self::Mana => Some(Self::MaxMana),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Flat table of one value per [`StatKind`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatSheet([f32; StatKind::COUNT]);

impl StatSheet {
    pub const fn zeroed() -> Self {
        Self([0.0; StatKind::COUNT])
    }

    #[inline]
    pub fn get(&self, kind: StatKind) -> f32 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: StatKind, value: f32) {
        self.0[kind.index()] = value;
    }

    /// Iterates `(kind, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f32)> + '_ {
        StatKind::iter().map(|kind| (kind, self.get(kind)))
    }
}

impl FromIterator<(StatKind, f32)> for StatSheet {
    fn from_iter<I: IntoIterator<Item = (StatKind, f32)>>(iter: I) -> Self {
        let mut sheet = Self::zeroed();
        for (kind, value) in iter {
            sheet.set(kind, value);
        }
        sheet
    }
}

/// Base and bonus stat layers of a combatant.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    base: StatSheet,
    bonus: StatSheet,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds stats from base values, clamping resources to their maximums.
    pub fn from_base(base: StatSheet) -> Self {
        let mut stats = Self {
            base,
            bonus: StatSheet::zeroed(),
        };
        stats.clamp_resources();
        stats
    }

    /// Sets a base value (builder pattern).
    ///
    /// Clamping applies immediately, so set maximums before resources.
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: f32) -> Self {
        self.set(kind, value);
        self
    }

    pub fn base(&self) -> &StatSheet {
        &self.base
    }

    pub fn bonus(&self) -> &StatSheet {
        &self.bonus
    }

    /// Effective value: base plus bonus, except for current resources.
    pub fn total(&self, kind: StatKind) -> f32 {
        if kind.is_resource() {
            self.base.get(kind)
        } else {
            self.base.get(kind) + self.bonus.get(kind)
        }
    }

    /// Writes a base value. Life and mana clamp to `[0, max]`.
    pub fn set(&mut self, kind: StatKind, value: f32) {
        self.base.set(kind, value);
        self.clamp_resources();
    }

    /// Adds `delta` to a base value and returns the clamped result.
    pub fn add(&mut self, kind: StatKind, delta: f32) -> f32 {
        self.set(kind, self.base.get(kind) + delta);
        self.base.get(kind)
    }

    /// Writes a bonus value. Resources have no bonus layer and are ignored.
    pub fn set_bonus(&mut self, kind: StatKind, value: f32) {
        if kind.is_resource() {
            return;
        }
        self.bonus.set(kind, value);
        self.clamp_resources();
    }

    /// Drops every bonus (e.g. before re-applying equipped gear).
    pub fn clear_bonuses(&mut self) {
        self.bonus = StatSheet::zeroed();
        self.clamp_resources();
    }

    #[inline]
    pub fn life(&self) -> f32 {
        self.base.get(StatKind::Life)
    }

    #[inline]
    pub fn mana(&self) -> f32 {
        self.base.get(StatKind::Mana)
    }

    /// Life as a fraction of max life, `0.0` when max life is not positive.
    pub fn life_ratio(&self) -> f32 {
        let max = self.total(StatKind::MaxLife);
        if max > 0.0 { self.life() / max } else { 0.0 }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life() > 0.0
    }

    fn clamp_resources(&mut self) {
        for resource in [StatKind::Life, StatKind::Mana] {
            if let Some(max_kind) = resource.maximum() {
                let max = self.total(max_kind).max(0.0);
                let clamped = self.base.get(resource).clamp(0.0, max);
                self.base.set(resource, clamped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources_clamp_to_maximum_on_write() {
        let mut stats = Stats::new()
            .with(StatKind::MaxLife, 20.0)
            .with(StatKind::Life, 50.0);
        assert_eq!(stats.life(), 20.0);

        stats.set(StatKind::Life, -5.0);
        assert_eq!(stats.life(), 0.0);
    }

    #[test]
    fn lowering_max_life_pulls_life_down() {
        let mut stats = Stats::new()
            .with(StatKind::MaxLife, 20.0)
            .with(StatKind::Life, 20.0);
        stats.set(StatKind::MaxLife, 12.0);
        assert_eq!(stats.life(), 12.0);
    }

    #[test]
    fn bonus_layer_adds_to_total_but_not_to_resources() {
        let mut stats = Stats::new()
            .with(StatKind::MaxMana, 10.0)
            .with(StatKind::Mana, 10.0)
            .with(StatKind::PhysicalDamage, 4.0);
        stats.set_bonus(StatKind::PhysicalDamage, 3.0);
        stats.set_bonus(StatKind::Mana, 99.0);

        assert_eq!(stats.total(StatKind::PhysicalDamage), 7.0);
        assert_eq!(stats.base().get(StatKind::PhysicalDamage), 4.0);
        assert_eq!(stats.mana(), 10.0);
    }

    #[test]
    fn max_bonus_raises_resource_ceiling() {
        let mut stats = Stats::new()
            .with(StatKind::MaxLife, 10.0)
            .with(StatKind::Life, 10.0);
        stats.set_bonus(StatKind::MaxLife, 5.0);
        assert_eq!(stats.add(StatKind::Life, 8.0), 15.0);

        stats.clear_bonuses();
        assert_eq!(stats.life(), 10.0);
    }

    #[test]
    fn stat_kind_names_round_trip_through_strings() {
        for kind in StatKind::iter() {
            let name: &'static str = kind.into();
            assert_eq!(name.parse::<StatKind>().ok(), Some(kind));
        }
    }
}
