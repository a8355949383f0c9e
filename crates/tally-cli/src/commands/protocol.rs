use std::path::Path;

use colored::Colorize;
use tally_mechanics::LastBreathOutcome;

use super::Loaded;

pub fn hp_roll(file: &Path, apply: bool) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let (report, gain) = loaded.session.roll_hp_gain();
    println!("  {}", report.text.bold());
    if apply {
        loaded.session.apply_hp_gain(&gain);
    } else {
        println!("  {}", "Not applied; rerun with --apply to raise max HP.".dimmed());
    }
    loaded.save()
}

pub fn last_breath(file: &Path) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let (_, breath) = loaded.session.last_breath();
    println!("  {} {}", "Last Breath:".bold(), breath.roll.format());
    let message = match breath.outcome {
        LastBreathOutcome::Evade => breath.outcome.message().green(),
        LastBreathOutcome::Bargain => breath.outcome.message().yellow(),
        LastBreathOutcome::JourneyEnds => breath.outcome.message().red().bold(),
    };
    println!("  {message}");
    loaded.save()
}
