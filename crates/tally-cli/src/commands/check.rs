use std::path::Path;

use colored::Colorize;
use tally_core::Stat;
use tally_mechanics::{AssistKind, CheckBand};

use super::Loaded;

/// A companion nominated to aid or interfere.
pub struct Helper {
    kind: AssistKind,
    name: String,
    bond: Option<i32>,
}

impl Helper {
    pub fn from_flags(
        aid: Option<String>,
        interfere: Option<String>,
        bond: Option<i32>,
    ) -> Option<Self> {
        let (kind, name) = match (aid, interfere) {
            (Some(name), _) => (AssistKind::Aid, name),
            (None, Some(name)) => (AssistKind::Interfere, name),
            (None, None) => return None,
        };
        Some(Self { kind, name, bond })
    }
}

pub fn run(file: &Path, stat: &str, helper: Option<Helper>, preview: bool) -> Result<(), String> {
    let stat: Stat = stat.parse().map_err(|e| format!("{e}"))?;
    let mut loaded = Loaded::open(file)?;

    if preview {
        let report = loaded.session.preview_check(stat);
        println!("  {} {}", "preview".dimmed(), report.text);
        return Ok(());
    }

    let request = helper.map(|h| loaded.session.assist_request(h.kind, &h.name, h.bond));
    let (report, outcome) = loaded.session.stat_check(stat, request);

    let text = match outcome.band {
        CheckBand::Success => report.text.green(),
        CheckBand::Partial => report.text.yellow(),
        CheckBand::Miss => report.text.red(),
    };
    println!("  {} {}", format!("{}:", stat.full_name()).bold(), text);
    println!("  {}", outcome.context().italic());

    if let Some(assist) = &outcome.assist {
        println!(
            "  {} rolled {} for {}",
            assist.helper.bold(),
            assist.helper_roll.format(),
            assist.kind
        );
        if let Some(bonus) = &assist.bonus_roll {
            println!("  Bonus die: {}", bonus.format());
        }
        if assist.consequence {
            let warning = format!("{} is exposed to danger, retribution, or cost", assist.helper);
            println!("  {}", warning.yellow());
        }
    }
    if outcome.xp_award > 0 {
        println!(
            "  +{} XP ({}/{})",
            outcome.xp_award,
            loaded.session.character().xp,
            loaded.session.character().xp_needed()
        );
    }
    loaded.save()
}
