use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use tally_session::notice::IDLE_TEXT;

use super::Loaded;

pub fn run(file: &Path, actions: bool) -> Result<(), String> {
    let loaded = Loaded::open(file)?;
    let session = &loaded.session;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if actions {
        let history = session.action_history();
        if history.is_empty() {
            println!("  Nothing to undo.");
            return Ok(());
        }
        table.set_header(vec!["#", "Action", "HP before", "Time"]);
        for (i, snapshot) in history.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                snapshot.action.clone(),
                format!("{}/{}", snapshot.state.hp, snapshot.state.max_hp),
                snapshot.timestamp.format("%H:%M:%S").to_string(),
            ]);
        }
        println!("{table}");
        println!();
        println!("  {} undoable actions", history.len());
        return Ok(());
    }

    let history = session.roll_history();
    if history.is_empty() {
        println!("  No rolls yet. {IDLE_TEXT}");
        return Ok(());
    }
    table.set_header(vec!["#", "Label", "Roll", "Total", "Time"]);
    for (i, roll) in history.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            roll.label().unwrap_or("—").to_string(),
            roll.format(),
            roll.total().to_string(),
            roll.timestamp().format("%H:%M:%S").to_string(),
        ]);
    }
    println!("{table}");
    println!();
    println!("  {} rolls", history.len());
    Ok(())
}
