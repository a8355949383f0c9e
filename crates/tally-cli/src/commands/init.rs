use std::path::Path;

use colored::Colorize;
use tally_core::{Character, Stats};

use super::Loaded;

pub fn run(file: &Path, name: &str, scores: Option<&[i32]>, force: bool) -> Result<(), String> {
    let mut loaded = Loaded::open(file)?;
    if loaded.has_character() && !force {
        return Err(format!(
            "{} already holds a character (use --force to replace it)",
            file.display()
        ));
    }

    let mut character = Character::new(name.trim());
    if let Some(scores) = scores {
        let scores: [i32; 6] = scores
            .try_into()
            .map_err(|_| format!("expected 6 scores, got {}", scores.len()))?;
        character.stats = Stats::from_scores(scores);
    }

    loaded.session.replace_character(character);
    println!(
        "  Created {} in {}",
        loaded.session.character().name.bold(),
        file.display()
    );
    loaded.save()
}
