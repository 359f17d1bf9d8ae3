//! Party inventory: item stacks, gold and equipped gear.
//!
//! The combat core only queues item consumptions. The session drains that
//! queue after every tick and applies the effects here, looking them up in
//! the content [`ItemCatalog`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use game_content::{ItemCatalog, ItemEffect};
use game_core::{ItemKind, StatKind, Stats};

/// Errors raised by inventory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("no {0} in the inventory")]
    Missing(ItemKind),

    #[error("{0} has no catalog entry")]
    Unknown(ItemKind),

    #[error("{0} cannot be consumed")]
    NotConsumable(ItemKind),

    #[error("{0} cannot be equipped")]
    NotGear(ItemKind),

    #[error("not enough gold: need {need}, have {have}")]
    InsufficientGold { need: u32, have: u32 },
}

/// A stack of identical items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub amount: u32,
    #[serde(default)]
    pub equipped: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    gold: u32,
    stacks: Vec<ItemStack>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    #[must_use]
    pub fn with_item(mut self, kind: ItemKind, amount: u32) -> Self {
        self.add(kind, amount);
        self
    }

    /// Rebuilds an inventory from saved stacks. Empty stacks are dropped.
    pub fn from_stacks(gold: u32, stacks: impl IntoIterator<Item = ItemStack>) -> Self {
        Self {
            gold,
            stacks: stacks.into_iter().filter(|s| s.amount > 0).collect(),
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn amount(&self, kind: ItemKind) -> u32 {
        self.stack(kind).map_or(0, |s| s.amount)
    }

    pub fn is_equipped(&self, kind: ItemKind) -> bool {
        self.stack(kind).is_some_and(|s| s.equipped)
    }

    fn stack(&self, kind: ItemKind) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.kind == kind)
    }

    fn stack_mut(&mut self, kind: ItemKind) -> Option<&mut ItemStack> {
        self.stacks.iter_mut().find(|s| s.kind == kind)
    }

    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        if amount == 0 {
            return;
        }
        match self.stack_mut(kind) {
            Some(stack) => stack.amount = stack.amount.saturating_add(amount),
            None => self.stacks.push(ItemStack {
                kind,
                amount,
                equipped: false,
            }),
        }
    }

    /// Removes `amount` items and returns what is left of the stack.
    pub fn remove(&mut self, kind: ItemKind, amount: u32) -> Result<u32, InventoryError> {
        let stack = self
            .stack_mut(kind)
            .filter(|s| s.amount >= amount)
            .ok_or(InventoryError::Missing(kind))?;
        stack.amount -= amount;
        let remaining = stack.amount;
        if remaining == 0 {
            self.stacks.retain(|s| s.kind != kind);
        }
        Ok(remaining)
    }

    pub fn earn(&mut self, gold: u32) {
        self.gold = self.gold.saturating_add(gold);
    }

    pub fn spend(&mut self, gold: u32) -> Result<(), InventoryError> {
        if gold > self.gold {
            return Err(InventoryError::InsufficientGold {
                need: gold,
                have: self.gold,
            });
        }
        self.gold -= gold;
        Ok(())
    }

    /// Buys one item at its catalog price.
    pub fn buy(&mut self, kind: ItemKind, catalog: &ItemCatalog) -> Result<(), InventoryError> {
        let definition = catalog.get(kind).ok_or(InventoryError::Unknown(kind))?;
        self.spend(definition.price)?;
        self.add(kind, 1);
        Ok(())
    }

    /// Uses up one consumable and returns the life and mana it restores.
    pub fn consume(
        &mut self,
        kind: ItemKind,
        catalog: &ItemCatalog,
    ) -> Result<(f32, f32, u32), InventoryError> {
        let definition = catalog.get(kind).ok_or(InventoryError::Unknown(kind))?;
        let ItemEffect::Restore { life, mana } = definition.effect else {
            return Err(InventoryError::NotConsumable(kind));
        };
        let remaining = self.remove(kind, 1)?;
        debug!(target: "runtime::inventory", item = %kind, remaining, "item consumed");
        Ok((life, mana, remaining))
    }

    pub fn equip(&mut self, kind: ItemKind, catalog: &ItemCatalog) -> Result<(), InventoryError> {
        let definition = catalog.get(kind).ok_or(InventoryError::Unknown(kind))?;
        if !definition.is_gear() {
            return Err(InventoryError::NotGear(kind));
        }
        let stack = self.stack_mut(kind).ok_or(InventoryError::Missing(kind))?;
        stack.equipped = true;
        Ok(())
    }

    pub fn unequip(&mut self, kind: ItemKind) -> Result<(), InventoryError> {
        let stack = self.stack_mut(kind).ok_or(InventoryError::Missing(kind))?;
        stack.equipped = false;
        Ok(())
    }

    /// Summed stat bonuses of every equipped item.
    pub fn gear_bonuses(&self, catalog: &ItemCatalog) -> Vec<(StatKind, f32)> {
        let mut totals: Vec<(StatKind, f32)> = Vec::new();
        let equipped = self
            .stacks
            .iter()
            .filter(|s| s.equipped)
            .filter_map(|s| catalog.get(s.kind));

        for definition in equipped {
            let ItemEffect::Gear { bonuses } = &definition.effect else {
                continue;
            };
            for &(stat, value) in bonuses {
                match totals.iter_mut().find(|(kind, _)| *kind == stat) {
                    Some((_, total)) => *total += value,
                    None => totals.push((stat, value)),
                }
            }
        }
        totals
    }

    /// Replaces the bonus layer of `stats` with the equipped gear.
    pub fn apply_gear(&self, stats: &mut Stats, catalog: &ItemCatalog) {
        stats.clear_bonuses();
        for (stat, value) in self.gear_bonuses(catalog) {
            stats.set_bonus(stat, value);
        }
    }
}
