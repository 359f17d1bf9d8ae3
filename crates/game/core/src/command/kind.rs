//! Command kind enumeration and static profiles.

/// Types of combat commands.
///
/// Each variant has a registered factory in the [`super::CommandPool`] and a
/// static [`CommandProfile`] describing targeting, AI classification and cost.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    // ========================================================================
    // Orderable
    // ========================================================================
    /// Physical strike against one target.
    Attack,

    /// Brace for a fixed time.
    Defend,

    /// Restore life to one ally.
    Heal,

    /// Cast the Protect buff on one ally.
    Protect,

    /// Magic damage against every enemy.
    Fire,

    /// Consume an item from the inventory.
    UseItem,

    // ========================================================================
    // System (assigned by the resolver, never ordered)
    // ========================================================================
    /// Fade out and leave the encounter.
    Death,

    /// Boss phase change.
    Transform,
}

/// Target arity a command expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetPolicy {
    NoTarget,
    Single,
    All,
}

impl TargetPolicy {
    /// Returns true if `count` targets satisfy this policy.
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::NoTarget => count == 0,
            Self::Single => count == 1,
            Self::All => count >= 1,
        }
    }
}

/// Classification used by AI providers to pick candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiCategory {
    Offensive,
    Defensive,
    Supportive,
    Undefined,
}

/// Static description of a command kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandProfile {
    pub target: TargetPolicy,
    pub ai_category: AiCategory,
    pub mana_cost: u32,
}

impl CommandKind {
    pub const fn profile(self) -> CommandProfile {
        use AiCategory::*;
        use TargetPolicy::*;

        let (target, ai_category, mana_cost) = match self {
            Self::Attack => (Single, Offensive, 0),
            Self::Defend => (NoTarget, Defensive, 0),
            Self::Heal => (Single, Supportive, 3),
            Self::Protect => (Single, Defensive, 2),
            Self::Fire => (All, Offensive, 4),
            Self::UseItem => (NoTarget, Undefined, 0),
            Self::Death => (NoTarget, Undefined, 0),
            Self::Transform => (NoTarget, Undefined, 0),
        };

        CommandProfile {
            target,
            ai_category,
            mana_cost,
        }
    }

    /// Returns false for kinds only the resolver may assign.
    pub const fn is_orderable(self) -> bool {
        !matches!(self, Self::Death | Self::Transform)
    }

    #[inline]
    pub const fn target_policy(self) -> TargetPolicy {
        self.profile().target
    }

    #[inline]
    pub const fn ai_category(self) -> AiCategory {
        self.profile().ai_category
    }

    #[inline]
    pub const fn mana_cost(self) -> u32 {
        self.profile().mana_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn system_kinds_are_free_and_untargeted() {
        for kind in [CommandKind::Death, CommandKind::Transform] {
            assert!(!kind.is_orderable());
            assert_eq!(kind.mana_cost(), 0);
            assert_eq!(kind.target_policy(), TargetPolicy::NoTarget);
            assert_eq!(kind.ai_category(), AiCategory::Undefined);
        }
    }

    #[test]
    fn target_policy_arity() {
        assert!(TargetPolicy::NoTarget.accepts(0));
        assert!(!TargetPolicy::NoTarget.accepts(1));
        assert!(TargetPolicy::Single.accepts(1));
        assert!(!TargetPolicy::Single.accepts(2));
        assert!(TargetPolicy::All.accepts(3));
        assert!(!TargetPolicy::All.accepts(0));
    }

    #[test]
    fn kinds_parse_from_their_display_name() {
        for kind in CommandKind::iter() {
            assert_eq!(kind.to_string().parse::<CommandKind>().ok(), Some(kind));
        }
    }
}
