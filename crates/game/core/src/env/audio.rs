/// Sound cues emitted by commands and buffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundId {
    Attack,
    Defend,
    Heal,
    Fire,
    Protect,
    Item,
    Death,
    Transform,
}

/// Fire-and-forget audio output.
pub trait AudioSink {
    fn play(&mut self, sound: SoundId);
}
