//! Reading a 2d6 total: 10+ is a full success, 7-9 a partial, 6- a miss.

use std::fmt;

use serde::{Deserialize, Serialize};
use tally_core::Stat;

/// Which band a move's total falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckBand {
    /// 10 or higher.
    Success,
    /// 7 to 9.
    Partial,
    /// 6 or lower.
    Miss,
}

impl CheckBand {
    /// Band for a total.
    pub fn of(total: i64) -> Self {
        match total {
            10.. => Self::Success,
            7..=9 => Self::Partial,
            _ => Self::Miss,
        }
    }

    /// Whether the total reached at least a partial success.
    pub fn is_hit(self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// Short result tag shown after the roll.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Success => "✅ Success!",
            Self::Partial => "⚠️ Partial Success",
            Self::Miss => "❌ Failure",
        }
    }

    /// Flavor text for a check of `stat` landing in this band.
    pub fn context(self, stat: Option<Stat>) -> &'static str {
        match (self, stat) {
            (Self::Success, Some(Stat::Str)) => "Power through with overwhelming force!",
            (Self::Success, Some(Stat::Dex)) => "Graceful and precise execution!",
            (Self::Success, Some(Stat::Con)) => "Tough as cybernetic nails!",
            (Self::Success, Some(Stat::Int)) => "Brilliant tactical insight!",
            (Self::Success, Some(Stat::Wis)) => "Crystal clear perception!",
            (Self::Success, Some(Stat::Cha)) => "Surprisingly charming for a cyber-barbarian!",
            (Self::Success, None) => "Perfect execution!",
            (Self::Partial, Some(Stat::Str)) => "Success, but strain yourself or equipment",
            (Self::Partial, Some(Stat::Dex)) => "Stumble slightly, awkward position",
            (Self::Partial, Some(Stat::Con)) => "Feel the strain, maybe take harm",
            (Self::Partial, Some(Stat::Int)) => "Confusing situation, partial info",
            (Self::Partial, Some(Stat::Wis)) => "Something seems off, can't quite tell what",
            (Self::Partial, Some(Stat::Cha)) => "Awkward interaction, mixed signals",
            (Self::Partial, None) => "Success with complications",
            (Self::Miss, Some(Stat::Str)) => "Too heavy, equipment fails, or overpower backfires",
            (Self::Miss, Some(Stat::Dex)) => "Trip, fumble, or end up in worse position",
            (Self::Miss, Some(Stat::Con)) => "Exhausted, hurt, or overcome by conditions",
            (Self::Miss, Some(Stat::Int)) => "No clue, wrong conclusion, or miss key detail",
            (Self::Miss, Some(Stat::Wis)) => "Completely missed the signs",
            (Self::Miss, Some(Stat::Cha)) => "Offensive, rude, or make things worse",
            (Self::Miss, None) => "Things go badly",
        }
    }
}

impl fmt::Display for CheckBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Partial => write!(f, "Partial Success"),
            Self::Miss => write!(f, "Miss"),
        }
    }
}
