use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tally_mechanics::{PresetOutcome, parse};
use tally_session::SessionError;

use super::{Loaded, describe};

pub fn add(file: &Path, name: &str, formula: &str) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    match loaded.session.add_preset(name, formula) {
        PresetOutcome::Added => println!("  Saved preset {}", name.trim().bold()),
        PresetOutcome::Replaced => println!("  Updated preset {}", name.trim().bold()),
        PresetOutcome::Full => {
            let capacity = loaded.session.presets().capacity();
            println!(
                "  {}",
                format!("Preset book is full ({capacity}); remove one first.").yellow()
            );
            return Ok(());
        }
        PresetOutcome::Rejected => {
            if name.trim().is_empty() {
                return Err("preset name is empty".into());
            }
            return match parse(formula.trim()) {
                Err(e) => Err(describe(SessionError::from(e))),
                Ok(_) => Err(format!("preset {name} was rejected")),
            };
        }
    }
    loaded.save()
}

pub fn remove(file: &Path, name: &str) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    if !loaded.session.remove_preset(name) {
        return Err(format!("no preset named \"{name}\""));
    }
    println!("  Removed preset {}", name.bold());
    loaded.save()
}

pub fn list(file: &Path) -> Result<(), String> {
    let loaded = Loaded::open(file)?;
    let presets = loaded.session.presets();
    if presets.is_empty() {
        println!("  No presets.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Formula"]);
    for preset in presets.iter() {
        table.add_row(vec![&preset.name, &preset.formula]);
    }
    println!("{table}");
    println!();
    println!("  {}/{} presets", presets.len(), presets.capacity());
    Ok(())
}

pub fn roll(file: &Path, name: &str) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let report = loaded.session.roll_preset(name).map_err(describe)?;
    println!("  {} {}", format!("{name}:").bold(), report.text);
    loaded.save()
}
