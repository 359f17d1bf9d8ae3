/// Combat tuning constants and tunable parameters.
///
/// Every timing value is expressed in seconds of simulated time; the resolver
/// only ever advances commands by the delta supplied to each tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Elapsed time after which an attack lands its hit.
    pub attack_impact_delay: f32,
    /// Fixed duration of the Defend command.
    pub defend_duration: f32,
    /// Fade-out time of the Death command before removal.
    pub death_duration: f32,
    /// Duration of a boss phase transformation.
    pub transform_duration: f32,
    /// Fraction of max life restored when a transformation starts.
    pub transform_life_fraction: f32,
    /// Life restored per Heal target.
    pub heal_life: f32,
    /// Mana restored per Heal target.
    pub heal_mana: f32,
    /// Flat magic damage added on top of the caster's magic damage by Fire.
    pub fire_bonus: f32,
    /// Number of hits a fresh Protect buff absorbs.
    pub protect_charges: u32,
    /// Multiplier applied to incoming physical damage while Protect holds.
    pub protect_physical_multiplier: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active buffs per combatant.
    pub const MAX_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_IMPACT_DELAY: f32 = 0.25;
    pub const DEFAULT_DEFEND_DURATION: f32 = 0.5;
    pub const DEFAULT_DEATH_DURATION: f32 = 0.75;
    pub const DEFAULT_TRANSFORM_DURATION: f32 = 4.5;
    pub const DEFAULT_TRANSFORM_LIFE_FRACTION: f32 = 0.75;
    pub const DEFAULT_HEAL_LIFE: f32 = 30.0;
    pub const DEFAULT_FIRE_BONUS: f32 = 5.0;
    pub const DEFAULT_PROTECT_CHARGES: u32 = 3;
    pub const DEFAULT_PROTECT_MULTIPLIER: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            attack_impact_delay: Self::DEFAULT_ATTACK_IMPACT_DELAY,
            defend_duration: Self::DEFAULT_DEFEND_DURATION,
            death_duration: Self::DEFAULT_DEATH_DURATION,
            transform_duration: Self::DEFAULT_TRANSFORM_DURATION,
            transform_life_fraction: Self::DEFAULT_TRANSFORM_LIFE_FRACTION,
            heal_life: Self::DEFAULT_HEAL_LIFE,
            heal_mana: 0.0,
            fire_bonus: Self::DEFAULT_FIRE_BONUS,
            protect_charges: Self::DEFAULT_PROTECT_CHARGES,
            protect_physical_multiplier: Self::DEFAULT_PROTECT_MULTIPLIER,
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
