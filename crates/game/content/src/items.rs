//! Item definitions.
//!
//! The combat core only knows item kinds. What a potion restores and what a
//! sword adds lives here and is applied by the runtime inventory.

use game_core::{ItemKind, StatKind};

/// What happens when an item is used or worn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemEffect {
    /// Consumed from the combat menu.
    Restore { life: f32, mana: f32 },
    /// Worn; adds stat bonuses while equipped.
    Gear { bonuses: Vec<(StatKind, f32)> },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub kind: ItemKind,
    pub name: String,
    /// Shop price in gold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price: u32,
    pub effect: ItemEffect,
}

impl ItemDefinition {
    pub fn is_gear(&self) -> bool {
        matches!(self.effect, ItemEffect::Gear { .. })
    }
}

/// Lookup table of item definitions by kind.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

impl ItemCatalog {
    pub fn new(items: Vec<ItemDefinition>) -> Self {
        Self { items }
    }

    pub fn get(&self, kind: ItemKind) -> Option<&ItemDefinition> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Built-in catalog used when no data directory is available.
    pub fn builtin() -> Self {
        use ItemEffect::*;

        let item = |kind, name: &str, price, effect| ItemDefinition {
            kind,
            name: name.to_string(),
            price,
            effect,
        };

        Self::new(vec![
            item(ItemKind::HealthPotion, "Health Potion", 10, Restore { life: 25.0, mana: 0.0 }),
            item(ItemKind::ManaPotion, "Mana Potion", 12, Restore { life: 0.0, mana: 10.0 }),
            item(ItemKind::Elixir, "Elixir", 40, Restore { life: 50.0, mana: 20.0 }),
            item(
                ItemKind::IronSword,
                "Iron Sword",
                60,
                Gear {
                    bonuses: vec![(StatKind::PhysicalDamage, 4.0)],
                },
            ),
            item(
                ItemKind::OakStaff,
                "Oak Staff",
                55,
                Gear {
                    bonuses: vec![(StatKind::MagicDamage, 3.0), (StatKind::MaxMana, 5.0)],
                },
            ),
            item(
                ItemKind::LeatherArmor,
                "Leather Armor",
                45,
                Gear {
                    bonuses: vec![(StatKind::PhysicalArmor, 2.0)],
                },
            ),
            item(
                ItemKind::WardedCloak,
                "Warded Cloak",
                50,
                Gear {
                    bonuses: vec![(StatKind::MagicArmor, 2.0), (StatKind::MaxLife, 5.0)],
                },
            ),
        ])
    }
}
