//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the encounter, injecting orders or streaming events from
//! specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use super::provider::PlayerOrder;
use crate::events::{Event, EventBus, Topic};
use crate::repository::SaveData;
use crate::session::SessionSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Inject a player order. Orders given while a round executes are held
    /// for the next round.
    pub async fn submit_order(&self, order: PlayerOrder) -> Result<()> {
        self.request(|reply| Command::SubmitOrder { order, reply })
            .await?
    }

    /// Advance the encounter by `delta` seconds of simulated time.
    pub async fn step(&self, delta: f32) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Step { delta, reply }).await?
    }

    /// Query the current encounter state (read-only snapshot)
    pub async fn query_state(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Capture the hero and the party inventory.
    pub async fn capture_save(&self) -> Result<SaveData> {
        self.request(|reply| Command::CaptureSave { reply }).await?
    }

    /// Replace the hero and the party inventory with a saved state.
    pub async fn restore_save(&self, save: SaveData) -> Result<()> {
        self.request(|reply| Command::RestoreSave {
            save: Box::new(save),
            reply,
        })
        .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Combat` - Every event dispatched by the resolver
    /// - `Topic::Session` - Rejected orders, item use, encounter end
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(event) = combat_rx.recv().await {
    ///     // Render damage numbers, play sounds...
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
