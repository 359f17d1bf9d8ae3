//! Command execution, mana accounting and buffs.

mod common;

use common::{Harness, count, hero, monster};
use game_core::{
    BuffKind, CommandKind, Damage, EventKind, ItemKind, ItemUse, OrderError, StatKind, Subscriber,
};

#[test]
fn defend_completes_on_cumulative_elapsed_time() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));

    let mut once = h
        .state
        .commands_mut()
        .obtain(CommandKind::Defend, a)
        .expect("defend is registered");
    assert!(h.engine().advance(&mut once, 0.5).expect("advance"));
    assert!(once.is_finished());

    let mut twice = h
        .state
        .commands_mut()
        .obtain(CommandKind::Defend, a)
        .expect("defend is registered");
    assert!(!h.engine().advance(&mut twice, 0.25).expect("advance"));
    assert!(!twice.is_finished());
    assert!(h.engine().advance(&mut twice, 0.25).expect("advance"));
    assert!(twice.is_finished());
}

#[test]
fn mana_is_deducted_exactly_once_on_completion() {
    let mut h = Harness::new();
    let mage = h.add(
        hero("Mira", 20.0, 10.0, 1.0)
            .with_learned(vec![CommandKind::Attack, CommandKind::Fire]),
    );
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));

    let mut fire = h
        .state
        .commands_mut()
        .obtain(CommandKind::Fire, mage)
        .expect("fire is registered")
        .with_targets(vec![b]);

    h.stage.hold(mage);
    assert!(!h.engine().advance(&mut fire, 0.1).expect("advance"));
    assert_eq!(h.mana(mage), 20.0);

    h.stage.release(mage);
    assert!(h.engine().advance(&mut fire, 0.1).expect("advance"));
    assert_eq!(h.mana(mage), 16.0);
    // Magic damage 3 plus the default bonus of 5.
    assert_eq!(h.life(b), 22.0);

    assert!(!h.engine().advance(&mut fire, 0.1).expect("advance"));
    assert_eq!(h.mana(mage), 16.0);
}

#[test]
fn overdrawn_mana_clamps_at_zero() {
    let mut h = Harness::new();
    let mage = h.add(hero("Mira", 20.0, 10.0, 1.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    h.state.roster.set_stat(mage, StatKind::Mana, 2.0);

    let mut fire = h
        .state
        .commands_mut()
        .obtain(CommandKind::Fire, mage)
        .expect("fire is registered")
        .with_targets(vec![b]);
    assert!(h.engine().advance(&mut fire, 0.1).expect("advance"));
    assert_eq!(h.mana(mage), 0.0);
}

#[test]
fn attack_hits_once_and_respects_armor() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    h.state.roster.set_stat(b, StatKind::PhysicalArmor, 2.0);
    let hits = h.record(&[EventKind::PostDamage]);

    let mut swing = h
        .state
        .commands_mut()
        .obtain(CommandKind::Attack, a)
        .expect("attack is registered")
        .with_targets(vec![b]);
    h.stage.hold(a);
    for _ in 0..5 {
        h.engine().advance(&mut swing, 0.1).expect("advance");
    }
    h.stage.release(a);
    assert!(h.engine().advance(&mut swing, 0.1).expect("advance"));

    assert_eq!(count(&hits, EventKind::PostDamage), 1);
    assert_eq!(h.life(b), 26.0);
}

#[test]
fn protect_is_refreshed_not_stacked() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 30.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));

    h.engine().attach_buff(a, BuffKind::Protect).expect("protect is registered");
    let dealt = h
        .engine()
        .deal_damage(b, a, Damage::physical(10.0))
        .expect("damage");
    assert_eq!(dealt, 5.0);

    let holder = h.state.roster.get(a).expect("holder");
    assert_eq!(holder.buffs().get(BuffKind::Protect).map(|b| b.counter()), Some(2));

    h.engine().attach_buff(a, BuffKind::Protect).expect("protect is registered");

    let holder = h.state.roster.get(a).expect("holder");
    assert_eq!(holder.buffs().len(), 1);
    assert_eq!(holder.buffs().get(BuffKind::Protect).map(|b| b.counter()), Some(3));
    let subscriber = Subscriber::Buff {
        holder: a,
        kind: BuffKind::Protect,
    };
    assert_eq!(h.state.events().listeners(EventKind::PreDamage), vec![subscriber]);
    assert_eq!(h.state.buffs().constructed(), 1);
}

#[test]
fn spent_protect_is_removed_and_pooled() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 30.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    let removed = h.record(&[EventKind::BuffAdded, EventKind::BuffRemoved]);

    h.engine().attach_buff(a, BuffKind::Protect).expect("protect is registered");
    for _ in 0..3 {
        h.engine()
            .deal_damage(b, a, Damage::physical(4.0))
            .expect("damage");
    }
    assert_eq!(h.life(a), 24.0);

    h.engine().expire_buffs();
    assert!(!h.state.roster.get(a).expect("holder").has_buff(BuffKind::Protect));
    assert_eq!(h.state.events().listener_count(EventKind::PreDamage), 0);
    assert_eq!(h.state.buffs().idle(BuffKind::Protect), 1);
    assert_eq!(count(&removed, EventKind::BuffRemoved), 1);

    h.engine()
        .deal_damage(b, a, Damage::physical(4.0))
        .expect("damage");
    assert_eq!(h.life(a), 20.0);
}

#[test]
fn protect_command_attaches_the_buff_on_finish() {
    let mut h = Harness::new();
    let cleric = h.add(hero("Cleo", 30.0, 10.0, 2.0));
    let ally = h.add(hero("Bran", 30.0, 8.0, 2.0));

    let mut cast = h
        .state
        .commands_mut()
        .obtain(CommandKind::Protect, cleric)
        .expect("protect is registered")
        .with_targets(vec![ally]);
    h.stage.hold(cleric);
    h.engine().advance(&mut cast, 0.1).expect("advance");
    assert!(!h.state.roster.get(ally).expect("ally").has_buff(BuffKind::Protect));

    h.stage.release(cleric);
    assert!(h.engine().advance(&mut cast, 0.1).expect("advance"));
    assert!(h.state.roster.get(ally).expect("ally").has_buff(BuffKind::Protect));
    assert_eq!(h.mana(cleric), 18.0);
}

#[test]
fn heal_applies_at_start_and_clamps() {
    let mut h = Harness::new();
    let cleric = h.add(hero("Cleo", 50.0, 10.0, 2.0));
    let ally = h.add(hero("Bran", 50.0, 8.0, 2.0));
    h.state.roster.set_stat(ally, StatKind::Life, 10.0);

    let mut heal = h
        .state
        .commands_mut()
        .obtain(CommandKind::Heal, cleric)
        .expect("heal is registered")
        .with_targets(vec![ally]);
    h.stage.hold(cleric);
    h.engine().advance(&mut heal, 0.1).expect("advance");
    assert_eq!(h.life(ally), 40.0);
    assert_eq!(h.mana(cleric), 20.0);

    h.engine().heal(cleric, ally, 30.0, 0.0);
    assert_eq!(h.life(ally), 50.0);
}

#[test]
fn item_use_is_queued_for_the_session() {
    let mut h = Harness::new();
    let a = h.add(
        hero("Aria", 20.0, 10.0, 6.0)
            .with_learned(vec![CommandKind::Attack, CommandKind::UseItem]),
    );
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    h.ai.set(b, game_core::Decision::defend());
    let consumed = h.record(&[EventKind::ItemConsumed]);

    h.tick(0.1);
    h.submit_item(a, ItemKind::HealthPotion).expect("order accepted");
    h.tick(0.1);

    assert_eq!(count(&consumed, EventKind::ItemConsumed), 1);
    assert_eq!(
        h.state.take_consumptions(),
        vec![ItemUse {
            source: a,
            item: ItemKind::HealthPotion
        }]
    );
    assert!(h.state.take_consumptions().is_empty());
}

#[test]
fn invalid_orders_are_rejected() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    let ghost = game_core::EntityId(99);

    assert_eq!(
        h.submit(ghost, CommandKind::Defend, Vec::new()),
        Err(OrderError::UnknownCombatant(ghost))
    );
    assert_eq!(
        h.submit(b, CommandKind::Defend, Vec::new()),
        Err(OrderError::NotPlayerControlled(b))
    );
    assert_eq!(
        h.submit(a, CommandKind::Death, Vec::new()),
        Err(OrderError::NotOrderable(CommandKind::Death))
    );
    assert_eq!(
        h.submit(a, CommandKind::Fire, vec![b]),
        Err(OrderError::NotLearned {
            combatant: a,
            kind: CommandKind::Fire
        })
    );
    assert!(matches!(
        h.submit(a, CommandKind::Attack, Vec::new()),
        Err(OrderError::TargetArity { got: 0, .. })
    ));
    assert_eq!(
        h.submit(a, CommandKind::Attack, vec![ghost]),
        Err(OrderError::UnknownTarget(ghost))
    );

    h.submit(a, CommandKind::Attack, vec![b]).expect("order accepted");
    assert_eq!(
        h.submit(a, CommandKind::Defend, Vec::new()),
        Err(OrderError::AlreadyOrdered(a))
    );
}

#[test]
fn repeated_targets_are_rejected_for_players_and_ai() {
    let mut h = Harness::new();
    let mage = h.add(
        hero("Mira", 20.0, 1.0, 1.0).with_learned(vec![CommandKind::Attack, CommandKind::Fire]),
    );
    let b = h.add(
        monster("Brute", 50.0, 5.0, 4.0)
            .with_learned(vec![CommandKind::Attack, CommandKind::Defend, CommandKind::Fire]),
    );
    h.ai.set(b, game_core::Decision::new(CommandKind::Fire, vec![mage, mage]));

    // The AI's stacked Fire is refused and it falls back to Defend.
    h.tick(0.1);
    assert_eq!(h.pending(b), Some(CommandKind::Defend));

    assert_eq!(
        h.submit(mage, CommandKind::Fire, vec![b, b, b]),
        Err(OrderError::DuplicateTarget(b))
    );
    assert_eq!(h.pending(mage), None);

    h.submit(mage, CommandKind::Fire, vec![b]).expect("single entry accepted");
    h.ticks(10, 0.1);
    assert_eq!(h.state.turn.round, 2);
    // One hit of magic damage 3 plus the fire bonus of 5.
    assert_eq!(h.life(b), 42.0);
}
