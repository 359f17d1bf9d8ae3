//! Round scheduling and termination through the public engine API.

mod common;

use common::{Harness, attack, count, hero, monster};
use game_core::{CommandKind, Decision, EventKind, Outcome, StatKind, TurnPhase};

const DT: f32 = 0.1;

#[test]
fn two_combatants_play_a_full_round() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 20.0, 5.0, 4.0));
    h.ai.set(b, attack(a));
    let log = h.record(&[EventKind::RoundStarted, EventKind::CommandFinished]);

    // Round 1 opens: AI orders are in, the party is asked.
    h.tick(DT);
    assert_eq!(h.state.turn.phase, TurnPhase::WaitForPlayerOrder);
    assert_eq!(h.state.turn.order, vec![a, b]);
    assert_eq!(h.pending(b), Some(CommandKind::Attack));

    h.submit(a, CommandKind::Attack, vec![b]).expect("order accepted");

    // A acts first.
    h.tick(DT);
    assert_eq!(h.state.turn.phase, TurnPhase::ExecuteOrders);
    assert_eq!(h.life(b), 14.0);
    assert_eq!(h.life(a), 20.0);
    assert_eq!(h.pending(a), None);

    // Then B.
    h.tick(DT);
    assert_eq!(h.life(a), 16.0);
    assert_eq!(h.pending(b), None);
    assert!(h.state.turn.all_orders_executed);

    // The next round starts and B is asked again.
    h.tick(DT);
    assert_eq!(h.state.turn.round, 2);
    assert_eq!(h.state.turn.phase, TurnPhase::WaitForPlayerOrder);
    assert_eq!(h.ai.calls, vec![b, b]);
    assert_eq!(count(&log, EventKind::RoundStarted), 2);
    assert_eq!(count(&log, EventKind::CommandFinished), 2);
}

#[test]
fn only_one_order_is_stepped_per_tick() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 20.0, 5.0, 4.0));
    h.ai.set(b, attack(a));
    let started = h.record(&[EventKind::CommandStarted]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![b]).expect("order accepted");

    h.stage.hold(a);
    h.ticks(10, DT);

    let in_flight = h.state.turn.in_flight.clone().expect("A is in flight");
    assert_eq!(in_flight.source, a);
    assert_eq!(count(&started, EventKind::CommandStarted), 1);
    let waiting = h.state.roster.get(b).and_then(|c| c.pending()).expect("B waits");
    assert!(!waiting.order().is_started());
    // The hit landed at the impact delay even though the swing continues.
    assert_eq!(h.life(b), 14.0);

    h.stage.release(a);
    h.tick(DT);
    assert_eq!(h.pending(a), None);
    h.tick(DT);
    assert_eq!(count(&started, EventKind::CommandStarted), 2);
}

#[test]
fn agility_ties_keep_their_previous_order() {
    let mut h = Harness::new();
    let p = h.add(hero("Pip", 20.0, 1.0, 1.0));
    let slow = h.add(monster("Slow", 20.0, 5.0, 1.0));
    let first = h.add(monster("First", 20.0, 10.0, 1.0));
    let second = h.add(monster("Second", 20.0, 10.0, 1.0));
    for id in [slow, first, second] {
        h.ai.set(id, Decision::defend());
    }

    h.tick(DT);
    assert_eq!(h.state.turn.order, vec![first, second, slow, p]);

    // Slow catches up with the tied pair and sorts behind them.
    h.state.roster.set_stat(slow, StatKind::Agility, 10.0);
    h.submit(p, CommandKind::Defend, Vec::new()).expect("order accepted");
    h.ticks(4, 0.5);
    h.tick(DT);

    assert_eq!(h.state.turn.round, 2);
    assert_eq!(h.state.turn.order, vec![first, second, slow, p]);
}

#[test]
fn failed_decisions_fall_back_to_defend() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let mute = h.add(monster("Mute", 20.0, 5.0, 4.0));
    let confused = h.add(monster("Confused", 20.0, 5.0, 4.0));
    // Attack needs exactly one target.
    h.ai.set(confused, Decision::new(CommandKind::Attack, vec![a, mute]));

    h.tick(DT);

    assert_eq!(h.pending(mute), Some(CommandKind::Defend));
    assert_eq!(h.pending(confused), Some(CommandKind::Defend));
}

#[test]
fn last_opponent_down_is_exactly_one_victory() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 5.0, 5.0, 4.0));
    h.ai.set(b, attack(a));
    let log = h.record(&[EventKind::Victory, EventKind::Defeat, EventKind::Death]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![b]).expect("order accepted");
    h.ticks(20, DT);

    assert_eq!(count(&log, EventKind::Death), 1);
    assert_eq!(count(&log, EventKind::Victory), 1);
    assert_eq!(count(&log, EventKind::Defeat), 0);
    assert_eq!(h.state.turn.outcome, Some(Outcome::Victory));
    assert_eq!(h.state.turn.phase, TurnPhase::Undefined);
    assert!(h.state.turn.in_flight.is_none());
    // B never got to swing back.
    assert_eq!(h.life(a), 20.0);
    assert!(h.submit(a, CommandKind::Defend, Vec::new()).is_err());
}

#[test]
fn last_party_member_down_is_exactly_one_defeat() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 4.0, 1.0, 1.0));
    let b = h.add(monster("Brute", 20.0, 5.0, 10.0));
    h.ai.set(b, attack(a));
    let log = h.record(&[EventKind::Victory, EventKind::Defeat]);

    h.tick(DT);
    h.submit(a, CommandKind::Defend, Vec::new()).expect("order accepted");
    h.ticks(20, DT);

    assert_eq!(count(&log, EventKind::Defeat), 1);
    assert_eq!(count(&log, EventKind::Victory), 0);
    assert_eq!(h.state.turn.outcome, Some(Outcome::Defeat));
    assert_eq!(h.state.turn.phase, TurnPhase::Undefined);
}

#[test]
fn death_mid_round_reopens_execution_and_removes_the_victim() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let weak = h.add(monster("Weak", 5.0, 5.0, 2.0));
    let tough = h.add(monster("Tough", 50.0, 1.0, 2.0));
    h.ai.set(weak, attack(a));
    h.ai.set(tough, attack(a));
    let log = h.record(&[EventKind::Death, EventKind::Removed, EventKind::RoundStarted]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![weak]).expect("order accepted");

    // A kills Weak; Weak's attack is replaced by its death order.
    h.tick(DT);
    assert_eq!(count(&log, EventKind::Death), 1);
    assert_eq!(h.pending(weak), Some(CommandKind::Death));
    assert!(h.state.turn.outcome.is_none());

    // Weak fades out over 0.75s, then Tough attacks.
    h.ticks(8, DT);
    assert!(!h.state.roster.contains(weak));
    assert!(!h.state.turn.order.contains(&weak));
    assert_eq!(count(&log, EventKind::Removed), 1);

    h.ticks(3, DT);
    assert_eq!(h.life(a), 18.0);
    assert_eq!(count(&log, EventKind::RoundStarted), 2);
    assert_eq!(h.state.turn.order, vec![a, tough]);
}

#[test]
fn boss_transforms_instead_of_dying() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 10.0));
    let minion = h.add(monster("Minion", 20.0, 1.0, 1.0));
    let boss = h.add(monster("Lich", 8.0, 5.0, 1.0).with_phases(1));
    h.ai.set(boss, attack(a));
    h.ai.set(minion, Decision::defend());
    let log = h.record(&[EventKind::PhaseChange, EventKind::Death, EventKind::Victory]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![boss]).expect("order accepted");
    h.tick(DT);

    assert_eq!(count(&log, EventKind::PhaseChange), 1);
    assert_eq!(count(&log, EventKind::Death), 0);
    assert_eq!(h.pending(boss), Some(CommandKind::Transform));
    let lich = h.state.roster.get(boss).expect("boss is still here");
    assert!(!lich.is_defeated());

    // Transformation starts on the boss's slot and restores life at once.
    h.tick(0.5);
    assert_eq!(h.life(boss), 6.0);
    assert_eq!(h.state.roster.get(boss).map(|c| c.phases), Some(0));
    assert_eq!(h.pending(boss), Some(CommandKind::Transform));

    h.ticks(8, 0.5);
    assert_eq!(h.pending(boss), None);
    assert_eq!(count(&log, EventKind::Victory), 0);
}

#[test]
fn orders_during_execution_wait_for_the_next_round() {
    let mut h = Harness::new();
    let a = h.add(hero("Aria", 20.0, 10.0, 6.0));
    let b = h.add(monster("Brute", 30.0, 5.0, 4.0));
    h.ai.set(b, attack(a));

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![b]).expect("order accepted");
    h.stage.hold(b);
    h.ticks(3, DT);
    assert_eq!(h.state.turn.phase, TurnPhase::ExecuteOrders);
    assert_eq!(h.pending(a), None);

    h.submit(a, CommandKind::Defend, Vec::new()).expect("deferred");
    assert_eq!(h.pending(a), None);
    assert_eq!(h.state.deferred_orders().count(), 1);
    assert!(h.submit(a, CommandKind::Defend, Vec::new()).is_err());

    h.stage.release(b);
    h.ticks(2, DT);
    assert_eq!(h.state.turn.round, 2);
    assert_eq!(h.pending(a), Some(CommandKind::Defend));
    assert_eq!(h.state.deferred_orders().count(), 0);
}

#[test]
fn death_after_acting_reopens_the_same_round() {
    let mut h = Harness::new();
    // Agility order: Weak, Tough, Aria.
    let a = h.add(hero("Aria", 20.0, 1.0, 6.0));
    let weak = h.add(monster("Weak", 5.0, 10.0, 2.0));
    let tough = h.add(monster("Tough", 50.0, 9.0, 2.0));
    h.ai.set(weak, attack(a));
    h.ai.set(tough, attack(a));
    let log = h.record(&[EventKind::Death, EventKind::Removed, EventKind::RoundStarted]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![weak]).expect("order accepted");
    h.ticks(3, DT);

    // Weak already acted; Aria closed the round by killing it.
    assert_eq!(h.life(a), 16.0);
    assert_eq!(count(&log, EventKind::Death), 1);
    assert_eq!(h.pending(weak), Some(CommandKind::Death));
    assert!(h.state.turn.all_orders_executed);

    // The fresh death order reopens execution instead of a new round.
    h.tick(DT);
    assert!(!h.state.turn.all_orders_executed);
    assert_eq!(h.state.turn.phase, TurnPhase::ExecuteOrders);
    assert_eq!(h.state.turn.round, 1);

    h.ticks(6, DT);
    assert!(h.state.roster.contains(weak));
    h.tick(DT);
    assert!(!h.state.roster.contains(weak));
    assert_eq!(count(&log, EventKind::Removed), 1);
    assert_eq!(count(&log, EventKind::RoundStarted), 1);

    h.ticks(2, DT);
    assert_eq!(count(&log, EventKind::RoundStarted), 2);
    assert_eq!(h.state.turn.order, vec![tough, a]);
}

#[test]
fn boss_downed_after_acting_transforms_within_the_round() {
    let mut h = Harness::new();
    // Agility order: Lich, Minion, Aria.
    let a = h.add(hero("Aria", 20.0, 1.0, 6.0));
    let boss = h.add(monster("Lich", 5.0, 10.0, 1.0).with_phases(1));
    let minion = h.add(monster("Minion", 20.0, 9.0, 1.0));
    h.ai.set(boss, attack(a));
    h.ai.set(minion, attack(a));
    let log = h.record(&[
        EventKind::PhaseChange,
        EventKind::Death,
        EventKind::RoundStarted,
        EventKind::Victory,
    ]);

    h.tick(DT);
    h.submit(a, CommandKind::Attack, vec![boss]).expect("order accepted");
    h.ticks(3, DT);

    assert_eq!(count(&log, EventKind::PhaseChange), 1);
    assert_eq!(h.pending(boss), Some(CommandKind::Transform));
    assert!(h.state.turn.all_orders_executed);

    // Transform starts in round 1 and restores 75% of max life.
    h.tick(0.5);
    assert!(!h.state.turn.all_orders_executed);
    assert_eq!(h.state.turn.round, 1);
    assert_eq!(h.life(boss), 3.75);
    assert_eq!(h.state.roster.get(boss).map(|c| c.phases), Some(0));

    // 4.5s in total.
    h.ticks(8, 0.5);
    assert_eq!(h.pending(boss), None);
    assert_eq!(h.state.turn.round, 1);
    assert_eq!(count(&log, EventKind::RoundStarted), 1);

    h.ticks(2, DT);
    assert_eq!(count(&log, EventKind::RoundStarted), 2);
    assert_eq!(h.state.turn.order, vec![boss, minion, a]);
    assert_eq!(count(&log, EventKind::Death), 0);
    assert_eq!(count(&log, EventKind::Victory), 0);
}
