//! Simulation worker that owns the authoritative [`EncounterSession`].
//!
//! Receives commands from [`crate::RuntimeHandle`], ticks the session and
//! republishes combat events to the [`EventBus`].

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

use game_core::{CombatFault, EventKind};
use strum::IntoEnumIterator;

use crate::api::{PlayerOrder, Result, RuntimeError};
use crate::events::{Event, EventBus, SessionEvent};
use crate::repository::SaveData;
use crate::session::{EncounterSession, SessionSnapshot};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Inject a player order.
    SubmitOrder {
        order: PlayerOrder,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Advance the encounter by `delta` seconds and return the new snapshot.
    Step {
        delta: f32,
        reply: oneshot::Sender<Result<SessionSnapshot>>,
    },
    /// Query the current encounter state (read-only).
    QueryState {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Capture the hero and inventory for persistence.
    CaptureSave {
        reply: oneshot::Sender<Result<SaveData>>,
    },
    /// Replace the hero and inventory with a saved state.
    RestoreSave {
        save: Box<SaveData>,
        reply: oneshot::Sender<Result<()>>,
    },
}

/// Background task that processes session commands.
pub struct SimulationWorker {
    session: EncounterSession,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    auto_tick: Option<(Duration, f32)>,
}

impl SimulationWorker {
    /// Creates a new simulation worker and bridges the session's combat
    /// events onto the bus.
    pub fn new(
        mut session: EncounterSession,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let kinds: Vec<EventKind> = EventKind::iter().collect();
        let bus = event_bus.clone();
        session.observe(&kinds, move |event| bus.publish(Event::Combat(*event)));

        tracing::info!(
            target: "runtime::worker",
            combatants = session.roster().len(),
            level = session.dungeon_level(),
            "SimulationWorker initialized"
        );

        Self {
            session,
            command_rx,
            event_bus,
            auto_tick: None,
        }
    }

    /// Also tick by `delta` every `interval` of wall time.
    #[must_use]
    pub fn with_auto_tick(mut self, interval: Duration, delta: f32) -> Self {
        self.auto_tick = Some((interval, delta));
        self
    }

    /// Main worker loop. Ends when every handle is dropped.
    pub async fn run(mut self) {
        let mut interval = self.auto_tick.map(|(period, delta)| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            (interval, delta)
        });

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                delta = next_auto_tick(&mut interval) => {
                    if let Err(err) = self.step(delta) {
                        error!(target: "runtime::worker", error = %err, "auto tick failed");
                    }
                }
            }
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SubmitOrder { order, reply } => {
                let result = self.submit(order);
                if reply.send(result).is_err() {
                    debug!("SubmitOrder reply channel closed (caller dropped)");
                }
            }
            Command::Step { delta, reply } => {
                let result = self.step(delta).map(|()| self.session.snapshot());
                if reply.send(result).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.session.snapshot()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::CaptureSave { reply } => {
                if reply.send(self.session.save_data()).is_err() {
                    debug!("CaptureSave reply channel closed (caller dropped)");
                }
            }
            Command::RestoreSave { save, reply } => {
                if reply.send(self.session.restore(&save)).is_err() {
                    debug!("RestoreSave reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn submit(&mut self, order: PlayerOrder) -> Result<()> {
        let (source, kind) = (order.source, order.kind);
        let result = self.session.submit_order(order);

        if let Err(err) = &result {
            let code = match err {
                RuntimeError::Order(order_err) => order_err.error_code(),
                RuntimeError::Combat(combat_err) => combat_err.error_code(),
                _ => "RUNTIME_ORDER_REJECTED",
            };
            debug!(
                target: "runtime::worker",
                source = %source,
                kind = %kind,
                code,
                error = %err,
                "order rejected"
            );
            self.event_bus.publish(Event::Session(SessionEvent::OrderRejected {
                source,
                kind,
                code: code.to_string(),
                message: err.to_string(),
            }));
        }
        result
    }

    fn step(&mut self, delta: f32) -> Result<()> {
        let report = self.session.tick(delta).inspect_err(|err| {
            error!(target: "runtime::worker", error = %err, "tick failed");
        })?;

        for (item_use, remaining) in report.items_used {
            self.event_bus.publish(Event::Session(SessionEvent::ItemUsed {
                source: item_use.source,
                item: item_use.item,
                remaining,
            }));
        }
        if let Some(outcome) = report.ended {
            self.event_bus.publish(Event::Session(SessionEvent::EncounterEnded {
                outcome,
                round: self.session.state().turn.round,
            }));
        }
        Ok(())
    }
}

async fn next_auto_tick(interval: &mut Option<(tokio::time::Interval, f32)>) -> f32 {
    match interval {
        Some((interval, delta)) => {
            interval.tick().await;
            *delta
        }
        None => std::future::pending().await,
    }
}
