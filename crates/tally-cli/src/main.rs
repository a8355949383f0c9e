//! CLI frontend for the Tally character sheet and dice roller.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally: a character sheet and dice roller for 2d6 tabletop games",
    version,
    propagate_version = true
)]
struct Cli {
    /// Store file holding the character, histories, presets and settings
    #[arg(short, long, global = true, default_value = "tally.json")]
    file: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fresh character to the store file
    Init {
        /// Character name
        #[arg(short, long, default_value = "Unnamed")]
        name: String,

        /// Ability scores in STR,DEX,CON,INT,WIS,CHA order
        #[arg(short, long, value_delimiter = ',')]
        scores: Option<Vec<i32>>,

        /// Replace an existing character
        #[arg(long)]
        force: bool,
    },

    /// Show the character sheet
    Show {
        /// Print the character record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Roll a formula such as 2d6+3 and record it
    Roll {
        /// Dice formula: [count]d<sides>[+|-<modifier>]
        formula: String,

        /// Label for the roll, e.g. "Hack and Slash"
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Roll a formula without recording it
    Preview {
        /// Dice formula: [count]d<sides>[+|-<modifier>]
        formula: String,
    },

    /// Make a stat check: 2d6 plus the stat modifier
    Check {
        /// Stat to check (STR, DEX, CON, INT, WIS, CHA)
        stat: String,

        /// A companion aids the roll
        #[arg(long, conflicts_with = "interfere")]
        aid: Option<String>,

        /// A companion interferes with the roll
        #[arg(long)]
        interfere: Option<String>,

        /// Helper's bond bonus (default: unresolved bonds with the helper)
        #[arg(long)]
        bond: Option<i32>,

        /// Roll without recording or awarding XP
        #[arg(long, conflicts_with_all = ["aid", "interfere"])]
        preview: bool,
    },

    /// Roll HP for a level up (d10 + CON, at least 1)
    HpRoll {
        /// Raise max and current HP by the result
        #[arg(long)]
        apply: bool,
    },

    /// Roll Last Breath at death's door
    LastBreath,

    /// Take damage (armor absorbs some)
    Damage {
        /// Incoming damage
        amount: i32,
    },

    /// Heal up to max HP
    Heal {
        /// HP to restore
        amount: i32,
    },

    /// Set current HP directly
    SetHp {
        /// New HP value
        hp: i32,
    },

    /// Toggle a status effect
    Status {
        /// Effect name, e.g. poisoned
        effect: String,
    },

    /// Toggle a debility
    Debility {
        /// Debility name, e.g. weak
        name: String,
    },

    /// Spend a Chrono-Retcon charge
    Retcon,

    /// Undo the last change to the character
    Undo,

    /// Show recent rolls
    History {
        /// Show undoable actions instead of rolls
        #[arg(long)]
        actions: bool,
    },

    /// Manage named roll presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Show or change session settings
    Config {
        /// Award 1 XP when a stat check misses
        #[arg(long)]
        auto_xp: Option<bool>,

        /// Seed rolls for reproducible results
        #[arg(long, conflicts_with = "clear_seed")]
        seed: Option<u64>,

        /// Go back to unseeded rolls
        #[arg(long)]
        clear_seed: bool,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// Save a formula under a name
    Add {
        /// Preset name
        name: String,
        /// Dice formula
        formula: String,
    },
    /// Delete a preset
    Remove {
        /// Preset name
        name: String,
    },
    /// List presets
    List,
    /// Roll a preset
    Roll {
        /// Preset name
        name: String,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TALLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = cli.file.as_path();
    let result = match cli.command {
        Commands::Init {
            name,
            scores,
            force,
        } => commands::init::run(file, &name, scores.as_deref(), force),
        Commands::Show { json } => commands::show::run(file, json),
        Commands::Roll { formula, label } => commands::roll::run(file, &formula, label.as_deref()),
        Commands::Preview { formula } => commands::roll::preview(file, &formula),
        Commands::Check {
            stat,
            aid,
            interfere,
            bond,
            preview,
        } => commands::check::run(
            file,
            &stat,
            commands::check::Helper::from_flags(aid, interfere, bond),
            preview,
        ),
        Commands::HpRoll { apply } => commands::protocol::hp_roll(file, apply),
        Commands::LastBreath => commands::protocol::last_breath(file),
        Commands::Damage { amount } => commands::vitals::damage(file, amount),
        Commands::Heal { amount } => commands::vitals::heal(file, amount),
        Commands::SetHp { hp } => commands::vitals::set_hp(file, hp),
        Commands::Status { effect } => commands::vitals::status(file, &effect),
        Commands::Debility { name } => commands::vitals::debility(file, &name),
        Commands::Retcon => commands::vitals::retcon(file),
        Commands::Undo => commands::vitals::undo(file),
        Commands::History { actions } => commands::history::run(file, actions),
        Commands::Preset { action } => match action {
            PresetAction::Add { name, formula } => commands::preset::add(file, &name, &formula),
            PresetAction::Remove { name } => commands::preset::remove(file, &name),
            PresetAction::List => commands::preset::list(file),
            PresetAction::Roll { name } => commands::preset::roll(file, &name),
        },
        Commands::Config {
            auto_xp,
            seed,
            clear_seed,
        } => commands::config::run(file, auto_xp, seed, clear_seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
