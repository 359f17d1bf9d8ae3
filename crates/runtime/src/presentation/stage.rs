use std::collections::HashMap;

use game_core::{AnimationKind, AnimationOracle, EntityId};

/// Animation oracle that plays fixed-length clips in simulated time.
///
/// Clips only progress through [`ScriptedStage::advance`], which the session
/// calls with the same delta it feeds the resolver.
#[derive(Clone, Debug)]
pub struct ScriptedStage {
    clips: HashMap<AnimationKind, f32>,
    playing: HashMap<EntityId, (AnimationKind, f32)>,
}

impl ScriptedStage {
    pub const DEFAULT_CLIP: f32 = 0.5;

    pub fn new() -> Self {
        let clips = [
            (AnimationKind::Attack, 0.5),
            (AnimationKind::Defend, 0.5),
            (AnimationKind::Cast, 0.6),
            (AnimationKind::Death, 0.75),
            (AnimationKind::Transform, 1.0),
        ]
        .into_iter()
        .collect();

        Self {
            clips,
            playing: HashMap::new(),
        }
    }

    /// Sets the length of one clip kind.
    #[must_use]
    pub fn with_clip(mut self, kind: AnimationKind, seconds: f32) -> Self {
        self.clips.insert(kind, seconds);
        self
    }

    /// Progresses every playing clip, dropping the ones that ended.
    pub fn advance(&mut self, delta: f32) {
        self.playing.retain(|_, (_, remaining)| {
            *remaining -= delta;
            *remaining > 0.0
        });
    }

    /// Clip currently playing for `entity`.
    pub fn current(&self, entity: EntityId) -> Option<AnimationKind> {
        self.playing.get(&entity).map(|(kind, _)| *kind)
    }

    pub fn clip_length(&self, kind: AnimationKind) -> f32 {
        self.clips.get(&kind).copied().unwrap_or(Self::DEFAULT_CLIP)
    }
}

impl Default for ScriptedStage {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationOracle for ScriptedStage {
    fn play(&mut self, entity: EntityId, kind: AnimationKind) {
        let length = self.clip_length(kind);
        if length > 0.0 {
            self.playing.insert(entity, (kind, length));
        } else {
            self.playing.remove(&entity);
        }
    }

    fn is_finished(&self, entity: EntityId) -> bool {
        !self.playing.contains_key(&entity)
    }
}
