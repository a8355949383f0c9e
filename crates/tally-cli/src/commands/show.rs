use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tally_core::Stat;

use super::Loaded;

pub fn run(file: &Path, json: bool) -> Result<(), String> {
    let loaded = Loaded::open(file)?;
    let c = loaded.session.character();

    if json {
        let text = serde_json::to_string_pretty(c).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    let title = if c.deceased {
        format!("{} (deceased)", c.name).red().bold()
    } else {
        c.name.bold()
    };
    println!("  {title} [level {}]", c.level);
    println!(
        "  HP {}/{}   XP {}/{}   Armor {}",
        c.hp,
        c.max_hp,
        c.xp,
        c.xp_needed(),
        c.total_armor()
    );
    if c.can_level_up() {
        println!("  {}", "Ready to level up!".green());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Score", "Mod"]);
    for stat in Stat::ALL {
        let score = c.stats.get(stat);
        table.add_row(vec![
            stat.abbreviation().to_string(),
            score.score.to_string(),
            format!("{:+}", score.modifier),
        ]);
    }
    println!("{table}");
    println!();

    let statuses: Vec<&str> = c.status_effects.iter().map(|s| s.name()).collect();
    let debilities: Vec<&str> = c.debilities.iter().map(|d| d.name()).collect();
    println!("  status:     {}", list_or_dash(&statuses));
    println!("  debilities: {}", list_or_dash(&debilities));
    println!(
        "  chrono:     {} uses   paradox: {}",
        c.resources.chrono_uses, c.resources.paradox_points
    );
    if !c.bonds.is_empty() {
        println!("  bonds:");
        for bond in &c.bonds {
            let marker = if bond.resolved { " (resolved)" } else { "" };
            println!("    {}: {}{marker}", bond.name.bold(), bond.relationship);
        }
    }
    if let Some(weapon) = c.equipped_weapon() {
        println!(
            "  weapon:     {} ({})",
            weapon.name,
            weapon.damage.as_deref().unwrap_or("—")
        );
    }
    Ok(())
}

fn list_or_dash(items: &[&str]) -> String {
    if items.is_empty() {
        "—".to_string()
    } else {
        items.join(", ")
    }
}
