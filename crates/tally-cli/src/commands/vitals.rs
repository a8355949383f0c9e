use std::path::Path;

use colored::Colorize;
use tally_core::{Character, Debility, StatusEffect, character::CHRONO_USES_MAX};

use super::Loaded;

fn hp_line(character: &Character) -> String {
    format!("HP {}/{}", character.hp, character.max_hp)
}

pub fn damage(file: &Path, amount: i32) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let taken = loaded.session.damage(amount);
    let character = loaded.session.character();
    let absorbed = amount.max(0) - taken;
    println!(
        "  Took {} damage ({absorbed} absorbed). {}",
        taken.to_string().red(),
        hp_line(character)
    );
    if character.hp == 0 && !character.deceased {
        println!("  {}", "At death's door: roll Last Breath.".red().bold());
    }
    loaded.save()
}

pub fn heal(file: &Path, amount: i32) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let restored = loaded.session.heal(amount);
    println!(
        "  Healed {}. {}",
        restored.to_string().green(),
        hp_line(loaded.session.character())
    );
    loaded.save()
}

pub fn set_hp(file: &Path, hp: i32) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    loaded.session.set_hp(hp);
    println!("  {}", hp_line(loaded.session.character()));
    loaded.save()
}

pub fn status(file: &Path, effect: &str) -> Result<(), String> {
    let effect: StatusEffect = effect.parse().map_err(|e| format!("{e}"))?;
    let mut loaded = Loaded::open(file)?;
    let active = loaded.session.toggle_status(effect);
    println!("  {}: {}", effect.name().bold(), on_off(active));
    if active {
        println!("  {}", effect.description().dimmed());
    }
    loaded.save()
}

pub fn debility(file: &Path, name: &str) -> Result<(), String> {
    let debility: Debility = name.parse().map_err(|e| format!("{e}"))?;
    let mut loaded = Loaded::open(file)?;
    let active = loaded.session.toggle_debility(debility);
    println!(
        "  {} (-1 {}): {}",
        debility.name().bold(),
        debility.stat(),
        on_off(active)
    );
    loaded.save()
}

pub fn retcon(file: &Path) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    if loaded.session.use_chrono_retcon() {
        println!(
            "  Chrono-Retcon uses: {}/{CHRONO_USES_MAX}",
            loaded.session.character().resources.chrono_uses
        );
    }
    loaded.save()
}

pub fn undo(file: &Path) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    if loaded.session.undo().is_some() {
        println!("  {}", hp_line(loaded.session.character()));
    }
    loaded.save()
}

fn on_off(active: bool) -> colored::ColoredString {
    if active { "on".green() } else { "off".dimmed() }
}
