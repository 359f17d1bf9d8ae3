//! Play one encounter to the end.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use game_content::ContentFactory;
use game_core::ItemKind;
use runtime::{
    AutoPilot, EncounterSession, Event, Inventory, Runtime, RuntimeConfig, RuntimeError, Topic,
};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{info, warn};

use crate::dirs;
use crate::player::StdinPlayer;
use crate::report::Narrator;

/// Play an encounter to the end
#[derive(Parser, Debug)]
pub struct Run {
    /// Encounter name (file stem under `<data-dir>/encounters`)
    pub encounter: String,

    /// Content directory (default: `$CONTENT_DATA_DIR` or the bundled data)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Simulated seconds per step
    #[arg(long, default_value_t = 1.0 / 30.0)]
    pub tick: f32,

    /// Give up after this many steps
    #[arg(long, default_value_t = 100_000)]
    pub max_steps: usize,

    /// Type the party's orders instead of letting the AI play them
    #[arg(short, long)]
    pub interactive: bool,

    /// Health potions in the starting inventory
    #[arg(long, default_value_t = 2)]
    pub potions: u32,

    /// Restore the hero from this save slot before the fight
    #[arg(long)]
    pub load: Option<String>,

    /// Save the hero into this slot after the fight
    #[arg(long)]
    pub save: Option<String>,

    /// Save directory (default: `$SAVE_DATA_DIR` or the platform data dir)
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Only print the outcome
    #[arg(short, long)]
    pub quiet: bool,
}

impl Run {
    pub async fn execute(self) -> Result<()> {
        if self.tick <= 0.0 {
            bail!("--tick must be positive");
        }

        let factory = ContentFactory::new(self.data_dir.clone().unwrap_or_else(dirs::content_dir));
        let config = factory.load_config()?;
        let catalog = factory.load_items()?;
        let spec = factory.load_encounter(&self.encounter)?;
        info!(
            encounter = %spec.name,
            party = spec.party().count(),
            opponents = spec.opponents().count(),
            "encounter loaded"
        );

        let session = EncounterSession::new(&spec, config)
            .with_catalog(catalog)
            .with_inventory(Inventory::new().with_item(ItemKind::HealthPotion, self.potions));

        let uses_saves = self.load.is_some() || self.save.is_some();
        let runtime_config = RuntimeConfig {
            tick_delta: self.tick,
            event_buffer_size: 4096,
            save_dir: uses_saves.then(|| self.save_dir.clone().unwrap_or_else(dirs::save_dir)),
            ..RuntimeConfig::default()
        };

        let builder = Runtime::builder().config(runtime_config).session(session);
        let mut runtime = if self.interactive {
            builder.player_provider(StdinPlayer::new()).build()?
        } else {
            builder.player_provider(AutoPilot::new()).build()?
        };

        if let Some(slot) = &self.load
            && !runtime.load(slot).await?
        {
            warn!(slot = %slot, "save slot is empty, starting fresh");
        }

        let mut combat_rx = runtime.subscribe(Topic::Combat);
        let mut session_rx = runtime.subscribe(Topic::Session);
        let mut snapshot = runtime.handle().query_state().await?;
        let narrator = Narrator::new(&snapshot);

        for _ in 0..self.max_steps {
            if snapshot.outcome.is_some() {
                break;
            }
            match runtime.step().await {
                Ok(next) => snapshot = next,
                // Refused typed orders are reported on the session topic; ask again.
                Err(RuntimeError::Order(_)) if self.interactive => {}
                Err(err) => return Err(err.into()),
            }
            if !self.quiet {
                print_events(&narrator, &mut combat_rx);
                print_events(&narrator, &mut session_rx);
            }
        }

        match snapshot.outcome {
            Some(outcome) => println!(
                "{}: {:?} in round {} ({:.1}s simulated)",
                spec.name, outcome, snapshot.round, snapshot.elapsed
            ),
            None => println!(
                "{}: undecided after {} steps (round {})",
                spec.name, self.max_steps, snapshot.round
            ),
        }

        if let Some(slot) = &self.save {
            runtime.save(slot).await?;
            println!("saved to slot `{slot}`");
        }

        runtime.shutdown().await?;
        Ok(())
    }
}

fn print_events(narrator: &Narrator, rx: &mut broadcast::Receiver<Event>) {
    loop {
        match rx.try_recv() {
            Ok(event) => {
                if let Some(line) = narrator.describe(&event) {
                    println!("{line}");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "event log fell behind");
            }
            Err(_) => break,
        }
    }
}
