//! Item catalog loader.

use std::path::Path;

use crate::items::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load an item catalog from a RON file.
    ///
    /// Duplicate kinds are rejected.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        for (index, item) in catalog.items.iter().enumerate() {
            if catalog.items[..index].iter().any(|other| other.kind == item.kind) {
                anyhow::bail!("Duplicate item definition for {}", item.kind);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ItemKind, StatKind};

    use super::*;
    use crate::items::ItemEffect;

    #[test]
    fn parses_restore_and_gear_entries() {
        let catalog = ItemLoader::parse(
            r#"(
                items: [
                    (kind: HealthPotion, name: "Health Potion", price: 10, effect: Restore(life: 25.0, mana: 0.0)),
                    (kind: IronSword, name: "Iron Sword", effect: Gear(bonuses: [(PhysicalDamage, 4.0)])),
                ],
            )"#,
        )
        .unwrap();

        let potion = catalog.get(ItemKind::HealthPotion).unwrap();
        assert_eq!(potion.effect, ItemEffect::Restore { life: 25.0, mana: 0.0 });

        let sword = catalog.get(ItemKind::IronSword).unwrap();
        assert_eq!(sword.price, 0);
        assert_eq!(
            sword.effect,
            ItemEffect::Gear {
                bonuses: vec![(StatKind::PhysicalDamage, 4.0)]
            }
        );
    }

    #[test]
    fn duplicate_kinds_are_rejected() {
        let result = ItemLoader::parse(
            r#"(
                items: [
                    (kind: Elixir, name: "A", effect: Restore(life: 1.0, mana: 1.0)),
                    (kind: Elixir, name: "B", effect: Restore(life: 2.0, mana: 2.0)),
                ],
            )"#,
        );
        assert!(result.is_err());
    }
}
