//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive an encounter.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{OrderProvider, Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::repository::{FileSaveRepository, SaveRepository};
use crate::session::{EncounterSession, SessionSnapshot};
use crate::workers::SimulationWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Simulated seconds per step.
    pub tick_delta: f32,
    /// When set, the worker also steps on its own at this wall-clock period.
    pub tick_interval: Option<Duration>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Directory for a file save repository, used when none is injected.
    pub save_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_delta: 1.0 / 30.0,
            tick_interval: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
            save_dir: None,
        }
    }
}

/// Main runtime that orchestrates an encounter
///
/// Design: Runtime owns the worker and coordinates player input.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    config: RuntimeConfig,

    // Shared handle (can be cloned for clients)
    handle: RuntimeHandle,

    // Injected collaborators
    player_provider: Option<Box<dyn OrderProvider>>,
    repository: Option<Arc<dyn SaveRepository>>,

    // Background worker
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Subscribe to events of one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Execute a single step
    ///
    /// Asks the player provider for every party member the resolver waits on,
    /// then advances the encounter by the configured tick delta.
    pub async fn step(&mut self) -> Result<SessionSnapshot> {
        let snapshot = self.handle.query_state().await?;

        if !snapshot.awaiting.is_empty() {
            let provider = self
                .player_provider
                .as_ref()
                .ok_or(RuntimeError::ProviderNotSet)?;
            for &actor in &snapshot.awaiting {
                let order = provider.provide_order(actor, &snapshot).await?;
                if order.source != actor {
                    return Err(RuntimeError::NotAwaitingOrder(order.source));
                }
                self.handle.submit_order(order).await?;
            }
        }

        self.handle.step(self.config.tick_delta).await
    }

    /// Step until the encounter ends or `max_steps` is exhausted.
    ///
    /// Returns the last snapshot; its `outcome` tells which case applied.
    pub async fn run_until_over(&mut self, max_steps: usize) -> Result<SessionSnapshot> {
        let mut snapshot = self.handle.query_state().await?;
        for _ in 0..max_steps {
            if snapshot.outcome.is_some() {
                break;
            }
            snapshot = self.step().await?;
        }
        info!(
            target: "runtime::worker",
            outcome = ?snapshot.outcome,
            round = snapshot.round,
            elapsed = snapshot.elapsed,
            "run finished"
        );
        Ok(snapshot)
    }

    /// Set the player order provider
    pub fn set_player_provider(&mut self, provider: impl OrderProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Persist the hero and the party inventory under `slot`.
    pub async fn save(&self, slot: &str) -> Result<()> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::RepositoryNotSet)?;
        let data = self.handle.capture_save().await?;
        repository.save(slot, &data)?;
        Ok(())
    }

    /// Restore the hero and the party inventory from `slot`.
    ///
    /// Returns false if the slot is empty.
    pub async fn load(&self, slot: &str) -> Result<bool> {
        let repository = self.repository.as_ref().ok_or(RuntimeError::RepositoryNotSet)?;
        let Some(data) = repository.load(slot)? else {
            return Ok(false);
        };
        self.handle.restore_save(data).await?;
        Ok(true)
    }

    /// Shutdown the runtime gracefully
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        debug!(target: "runtime::worker", "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session: Option<EncounterSession>,
    player_provider: Option<Box<dyn OrderProvider>>,
    repository: Option<Arc<dyn SaveRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session: None,
            player_provider: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the encounter to run
    pub fn session(mut self, session: EncounterSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Set player order provider (optional)
    pub fn player_provider(mut self, provider: impl OrderProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Set the save repository (optional)
    ///
    /// If not provided and `config.save_dir` is set, a
    /// [`FileSaveRepository`] rooted there is used.
    pub fn repository(mut self, repository: Arc<dyn SaveRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Spawn the worker and return the running runtime.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let session = self.session.ok_or(RuntimeError::MissingSession)?;

        let repository = match (self.repository, &self.config.save_dir) {
            (Some(repository), _) => Some(repository),
            (None, Some(dir)) => {
                Some(Arc::new(FileSaveRepository::new(dir)?) as Arc<dyn SaveRepository>)
            }
            (None, None) => None,
        };

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let mut worker = SimulationWorker::new(session, command_rx, event_bus.clone());
        if let Some(interval) = self.config.tick_interval {
            worker = worker.with_auto_tick(interval, self.config.tick_delta);
        }
        let sim_worker_handle = tokio::spawn(worker.run());

        Ok(Runtime {
            config: self.config,
            handle: RuntimeHandle::new(command_tx, event_bus),
            player_provider: self.player_provider,
            repository,
            sim_worker_handle,
        })
    }
}
