use std::path::Path;

use colored::Colorize;

use super::{Loaded, describe};

pub fn run(file: &Path, formula: &str, label: Option<&str>) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let report = loaded.session.roll(formula, label).map_err(describe)?;
    match report.result.label() {
        Some(label) => println!("  {} {}", format!("{label}:").bold(), report.text),
        None => println!("  {}", report.text),
    }
    loaded.save()
}

pub fn preview(file: &Path, formula: &str) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let report = loaded.session.preview(formula).map_err(describe)?;
    println!("  {} {}", "preview".dimmed(), report.text);
    Ok(())
}
