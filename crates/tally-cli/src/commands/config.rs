use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use super::Loaded;

pub fn run(
    file: &Path,
    auto_xp: Option<bool>,
    seed: Option<u64>,
    clear_seed: bool,
) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    let mut config = loaded.session.config().clone();
    let changed = auto_xp.is_some() || seed.is_some() || clear_seed;

    if let Some(enabled) = auto_xp {
        config = config.with_auto_xp_on_miss(enabled);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if clear_seed {
        config.seed = None;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec!["XP on miss".to_string(), config.auto_xp_on_miss.to_string()]);
    table.add_row(vec![
        "Seed".to_string(),
        config.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
    ]);
    table.add_row(vec!["Roll history".to_string(), config.roll_history_capacity.to_string()]);
    table.add_row(vec!["Undo depth".to_string(), config.action_history_capacity.to_string()]);
    table.add_row(vec!["Presets".to_string(), config.preset_capacity.to_string()]);
    println!("{table}");

    if !changed {
        return Ok(());
    }
    loaded.session.set_config(config);
    loaded.save()
}
