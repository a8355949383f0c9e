use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::stats::Stat;

/// A temporary condition on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusEffect {
    /// -1 to all rolls.
    Poisoned,
    /// -2 to DEX rolls.
    Shocked,
    /// Fire damage each turn.
    Burning,
    /// -1 to physical actions.
    Frozen,
    /// The GM controls one action.
    Confused,
    /// -1 to damage rolls.
    Weakened,
    /// +1 to all rolls.
    Blessed,
    /// Cannot be targeted.
    Invisible,
}

impl StatusEffect {
    /// Every status effect.
    pub const ALL: [StatusEffect; 8] = [
        Self::Poisoned,
        Self::Shocked,
        Self::Burning,
        Self::Frozen,
        Self::Confused,
        Self::Weakened,
        Self::Blessed,
        Self::Invisible,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Poisoned => "Poisoned",
            Self::Shocked => "Shocked",
            Self::Burning => "Burning",
            Self::Frozen => "Frozen",
            Self::Confused => "Confused",
            Self::Weakened => "Weakened",
            Self::Blessed => "Blessed",
            Self::Invisible => "Invisible",
        }
    }

    /// Short rules text.
    pub fn description(self) -> &'static str {
        match self {
            Self::Poisoned => "-1 to all rolls",
            Self::Shocked => "-2 to DEX rolls",
            Self::Burning => "Fire damage each turn",
            Self::Frozen => "-1 to physical actions",
            Self::Confused => "GM controls one action",
            Self::Weakened => "-1 to damage rolls",
            Self::Blessed => "+1 to all rolls",
            Self::Invisible => "Cannot be targeted",
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StatusEffect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|effect| effect.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

/// A lasting injury that penalizes rolls of one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Debility {
    /// -1 to STR rolls.
    Weak,
    /// -1 to DEX rolls.
    Shaky,
    /// -1 to CON rolls.
    Sick,
    /// -1 to INT rolls.
    Stunned,
    /// -1 to WIS rolls.
    Confused,
    /// -1 to CHA rolls.
    Scarred,
}

impl Debility {
    /// Every debility, in stat order.
    pub const ALL: [Debility; 6] = [
        Self::Weak,
        Self::Shaky,
        Self::Sick,
        Self::Stunned,
        Self::Confused,
        Self::Scarred,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Weak => "Weak",
            Self::Shaky => "Shaky",
            Self::Sick => "Sick",
            Self::Stunned => "Stunned",
            Self::Confused => "Confused",
            Self::Scarred => "Scarred",
        }
    }

    /// The stat this debility penalizes.
    pub fn stat(self) -> Stat {
        match self {
            Self::Weak => Stat::Str,
            Self::Shaky => Stat::Dex,
            Self::Sick => Stat::Con,
            Self::Stunned => Stat::Int,
            Self::Confused => Stat::Wis,
            Self::Scarred => Stat::Cha,
        }
    }
}

impl fmt::Display for Debility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Debility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|debility| debility.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::UnknownDebility(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_case_insensitive() {
        assert_eq!("poisoned".parse::<StatusEffect>().unwrap(), StatusEffect::Poisoned);
        assert_eq!("BLESSED".parse::<StatusEffect>().unwrap(), StatusEffect::Blessed);
        assert!(matches!(
            "sleepy".parse::<StatusEffect>(),
            Err(CoreError::UnknownStatus(_))
        ));
    }

    #[test]
    fn debility_maps_to_stat() {
        assert_eq!(Debility::Weak.stat(), Stat::Str);
        assert_eq!(Debility::Scarred.stat(), Stat::Cha);
        for (debility, stat) in Debility::ALL.iter().zip(Stat::ALL) {
            assert_eq!(debility.stat(), stat);
        }
    }

    #[test]
    fn serde_lowercase_keys() {
        let json = serde_json::to_string(&StatusEffect::Frozen).unwrap();
        assert_eq!(json, "\"frozen\"");
        let d: Debility = serde_json::from_str("\"shaky\"").unwrap();
        assert_eq!(d, Debility::Shaky);
    }
}
