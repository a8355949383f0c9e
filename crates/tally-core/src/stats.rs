use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the six ability stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    /// Strength.
    #[serde(rename = "STR")]
    Str,
    /// Dexterity.
    #[serde(rename = "DEX")]
    Dex,
    /// Constitution.
    #[serde(rename = "CON")]
    Con,
    /// Intelligence.
    #[serde(rename = "INT")]
    Int,
    /// Wisdom.
    #[serde(rename = "WIS")]
    Wis,
    /// Charisma.
    #[serde(rename = "CHA")]
    Cha,
}

impl Stat {
    /// All stats in sheet order.
    pub const ALL: [Stat; 6] = [
        Self::Str,
        Self::Dex,
        Self::Con,
        Self::Int,
        Self::Wis,
        Self::Cha,
    ];

    /// The three-letter abbreviation, e.g. `"STR"`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Dex => "DEX",
            Self::Con => "CON",
            Self::Int => "INT",
            Self::Wis => "WIS",
            Self::Cha => "CHA",
        }
    }

    /// The full stat name, e.g. `"Strength"`.
    pub fn full_name(self) -> &'static str {
        match self {
            Self::Str => "Strength",
            Self::Dex => "Dexterity",
            Self::Con => "Constitution",
            Self::Int => "Intelligence",
            Self::Wis => "Wisdom",
            Self::Cha => "Charisma",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for Stat {
    type Err = CoreError;

    /// Accepts the abbreviation or the full name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|stat| {
                stat.abbreviation().eq_ignore_ascii_case(&lower)
                    || stat.full_name().eq_ignore_ascii_case(&lower)
            })
            .ok_or_else(|| CoreError::UnknownStat(s.to_string()))
    }
}

/// A raw ability score and the modifier it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// The raw score (3-18 for a standard character).
    pub score: i32,
    /// The modifier added to rolls made with this stat.
    #[serde(rename = "mod")]
    pub modifier: i32,
}

impl AbilityScore {
    /// Build a score and derive its modifier from the standard table.
    pub fn new(score: i32) -> Self {
        Self {
            score,
            modifier: modifier_for(score),
        }
    }
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::new(10)
    }
}

/// The modifier table: 1-3 is -3, 4-5 is -2, 6-8 is -1, 9-12 is 0,
/// 13-15 is +1, 16-17 is +2, 18 and above is +3.
pub fn modifier_for(score: i32) -> i32 {
    match score {
        i32::MIN..=3 => -3,
        4..=5 => -2,
        6..=8 => -1,
        9..=12 => 0,
        13..=15 => 1,
        16..=17 => 2,
        _ => 3,
    }
}

/// The six ability scores of a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Strength.
    #[serde(rename = "STR")]
    pub strength: AbilityScore,
    /// Dexterity.
    #[serde(rename = "DEX")]
    pub dexterity: AbilityScore,
    /// Constitution.
    #[serde(rename = "CON")]
    pub constitution: AbilityScore,
    /// Intelligence.
    #[serde(rename = "INT")]
    pub intelligence: AbilityScore,
    /// Wisdom.
    #[serde(rename = "WIS")]
    pub wisdom: AbilityScore,
    /// Charisma.
    #[serde(rename = "CHA")]
    pub charisma: AbilityScore,
}

impl Stats {
    /// Build stats from raw scores in sheet order (STR, DEX, CON, INT, WIS, CHA).
    pub fn from_scores(scores: [i32; 6]) -> Self {
        let [str_, dex, con, int, wis, cha] = scores;
        Self {
            strength: AbilityScore::new(str_),
            dexterity: AbilityScore::new(dex),
            constitution: AbilityScore::new(con),
            intelligence: AbilityScore::new(int),
            wisdom: AbilityScore::new(wis),
            charisma: AbilityScore::new(cha),
        }
    }

    /// Get the score for a stat.
    pub fn get(&self, stat: Stat) -> &AbilityScore {
        match stat {
            Stat::Str => &self.strength,
            Stat::Dex => &self.dexterity,
            Stat::Con => &self.constitution,
            Stat::Int => &self.intelligence,
            Stat::Wis => &self.wisdom,
            Stat::Cha => &self.charisma,
        }
    }

    /// Get a mutable reference to the score for a stat.
    pub fn get_mut(&mut self, stat: Stat) -> &mut AbilityScore {
        match stat {
            Stat::Str => &mut self.strength,
            Stat::Dex => &mut self.dexterity,
            Stat::Con => &mut self.constitution,
            Stat::Int => &mut self.intelligence,
            Stat::Wis => &mut self.wisdom,
            Stat::Cha => &mut self.charisma,
        }
    }

    /// The modifier for a stat.
    pub fn modifier(&self, stat: Stat) -> i32 {
        self.get(stat).modifier
    }
}
