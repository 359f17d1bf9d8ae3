//! Player orders typed on stdin.

use anyhow::{Context, anyhow, bail};
use async_trait::async_trait;
use game_core::{CommandKind, EntityId, ItemKind, TargetPolicy};
use runtime::{CombatantView, OrderProvider, PlayerOrder, SessionSnapshot};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Reads one order per line, e.g. `attack 2`, `fire`, `item HealthPotion`.
///
/// Closing stdin makes every remaining party member defend.
pub struct StdinPlayer {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinPlayer {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderProvider for StdinPlayer {
    async fn provide_order(
        &self,
        actor: EntityId,
        snapshot: &SessionSnapshot,
    ) -> runtime::Result<PlayerOrder> {
        let mut lines = self.lines.lock().await;
        loop {
            print_prompt(actor, snapshot);
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) | Err(_) => {
                    return Ok(PlayerOrder::new(actor, CommandKind::Defend, Vec::new()));
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_order(actor, &line, snapshot) {
                Ok(order) => return Ok(order),
                Err(err) => println!("  ! {err:#}"),
            }
        }
    }
}

fn print_prompt(actor: EntityId, snapshot: &SessionSnapshot) {
    println!();
    for view in &snapshot.combatants {
        let side = if view.player_controlled { "party" } else { "enemy" };
        println!(
            "  #{:<2} {:<12} {:<5} life {:>5.1}/{:<5.1} mana {:>4.1}/{:<4.1}{}",
            view.id.0,
            view.name,
            side,
            view.life,
            view.max_life,
            view.mana,
            view.max_mana,
            if view.is_alive() { "" } else { "  (down)" }
        );
    }
    if let Some(view) = snapshot.get(actor) {
        let learned: Vec<String> = view.learned.iter().map(ToString::to_string).collect();
        println!("{} [{}] > ", view.name, learned.join(", "));
    }
}

/// Parses `<command> [target ids...]` or `item <ItemKind>`.
///
/// `All` commands without explicit targets hit every living opponent.
pub fn parse_order(
    actor: EntityId,
    line: &str,
    snapshot: &SessionSnapshot,
) -> anyhow::Result<PlayerOrder> {
    let mut words = line.split_whitespace();
    let verb = words.next().ok_or_else(|| anyhow!("empty order"))?;

    if verb.eq_ignore_ascii_case("item") || verb.eq_ignore_ascii_case("useitem") {
        let name = words.next().context("which item?")?;
        let item = ItemKind::iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow!("unknown item `{name}`"))?;
        return Ok(PlayerOrder::use_item(actor, item));
    }

    let kind = CommandKind::iter()
        .find(|kind| kind.to_string().eq_ignore_ascii_case(verb))
        .ok_or_else(|| anyhow!("unknown command `{verb}`"))?;

    let mut targets = words
        .map(|word| {
            word.trim_start_matches('#')
                .parse::<u32>()
                .map(EntityId)
                .with_context(|| format!("`{word}` is not a combatant id"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match kind.target_policy() {
        TargetPolicy::All if targets.is_empty() => {
            targets = opponents(actor, snapshot).map(|view| view.id).collect();
        }
        TargetPolicy::Single if targets.len() != 1 => bail!("{kind} takes exactly one target"),
        TargetPolicy::NoTarget if !targets.is_empty() => bail!("{kind} takes no target"),
        _ => {}
    }

    Ok(PlayerOrder::new(actor, kind, targets))
}

fn opponents<'a>(
    actor: EntityId,
    snapshot: &'a SessionSnapshot,
) -> impl Iterator<Item = &'a CombatantView> {
    let side = snapshot.get(actor).map(|view| view.player_controlled);
    snapshot
        .combatants
        .iter()
        .filter(move |view| view.is_alive() && Some(view.player_controlled) != side)
}

#[cfg(test)]
mod tests {
    use game_core::{CombatConfig, CombatantTemplate, Roster, StatKind};
    use runtime::EncounterSession;

    use super::*;

    fn snapshot() -> SessionSnapshot {
        let stats = vec![(StatKind::MaxLife, 20.0), (StatKind::Life, 20.0)];
        let mut hero = CombatantTemplate::new("Hero", stats.clone());
        hero.player_controlled = true;

        let mut roster = Roster::new();
        roster.spawn(&hero);
        roster.spawn(&CombatantTemplate::new("Rat", stats.clone()));
        roster.spawn(&CombatantTemplate::new("Bat", stats));
        EncounterSession::from_roster(roster, CombatConfig::default()).snapshot()
    }

    #[test]
    fn commands_are_case_insensitive() {
        let order = parse_order(EntityId(0), "ATTACK #1", &snapshot()).unwrap();
        assert_eq!(order, PlayerOrder::new(EntityId(0), CommandKind::Attack, vec![EntityId(1)]));
    }

    #[test]
    fn fire_defaults_to_every_opponent() {
        let order = parse_order(EntityId(0), "fire", &snapshot()).unwrap();
        assert_eq!(order.targets, vec![EntityId(1), EntityId(2)]);
    }

    #[test]
    fn items_are_named() {
        let order = parse_order(EntityId(0), "item healthpotion", &snapshot()).unwrap();
        assert_eq!(order, PlayerOrder::use_item(EntityId(0), ItemKind::HealthPotion));
    }

    #[test]
    fn malformed_orders_are_refused() {
        let snapshot = snapshot();
        assert!(parse_order(EntityId(0), "attack", &snapshot).is_err());
        assert!(parse_order(EntityId(0), "attack rat", &snapshot).is_err());
        assert!(parse_order(EntityId(0), "defend 1", &snapshot).is_err());
        assert!(parse_order(EntityId(0), "dance", &snapshot).is_err());
    }
}
