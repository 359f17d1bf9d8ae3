use super::EntityId;

/// Kinds of items a combatant can carry.
///
/// Item effects live with the inventory owner; the core only knows which
/// kinds can be consumed from the combat menu.
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
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    // Consumables
    HealthPotion,
    ManaPotion,
    Elixir,

    // Gear
    IronSword,
    OakStaff,
    LeatherArmor,
    WardedCloak,
}

impl ItemKind {
    /// Returns true if the item is used up by the UseItem command.
    pub const fn is_consumable(self) -> bool {
        matches!(self, Self::HealthPotion | Self::ManaPotion | Self::Elixir)
    }
}

/// A queued consumption produced by a completed UseItem command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUse {
    pub source: EntityId,
    pub item: ItemKind,
}
