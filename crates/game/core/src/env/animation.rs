use crate::state::EntityId;

/// Clips a combatant can be asked to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationKind {
    Attack,
    Defend,
    Cast,
    Death,
    Transform,
}

/// Animation playback oracle.
///
/// Animation-bound commands complete when [`AnimationOracle::is_finished`]
/// reports true for their source. Implementations must eventually report
/// completion for every clip they were asked to play.
pub trait AnimationOracle {
    fn play(&mut self, entity: EntityId, kind: AnimationKind);

    /// True once the most recent clip for `entity` has ended, or when none
    /// is playing.
    fn is_finished(&self, entity: EntityId) -> bool;
}
