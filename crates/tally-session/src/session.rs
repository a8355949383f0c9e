//! Character session management.
//!
//! `Session` owns the live character together with its roll history, undo
//! history and presets. Every operation runs to completion synchronously;
//! the only timing it exposes is advisory (`reveal_after`, notice durations)
//! for the host to schedule.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tally_core::{Character, Debility, Stat, StatusEffect};
use tally_mechanics::protocol::{resolve_assist, roll_hp_gain, roll_last_breath};
use tally_mechanics::{
    AssistKind, AssistRequest, CheckOutcome, DieSource, HpGain, LastBreath, LastBreathOutcome,
    PresetBook, PresetOutcome, RollHistory, RollKind, RollResult, Situational, StatCheck,
    roll_formula,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::notice::{Notice, Notifier, Silent};
use crate::store::{
    ACTION_HISTORY_KEY, CHARACTER_KEY, KeyValueStore, ROLL_CURSOR_KEY, ROLL_HISTORY_KEY,
    SETTINGS_KEY, load_presets, save_presets,
};
use crate::undo::ActionHistory;

/// Message shown when the Chrono-Retcon ring is spent.
pub const NO_USES_TEXT: &str = "❌ No uses remaining!";
/// Message shown when the ring is used.
pub const RETCON_TEXT: &str = "⏰ Chrono-Retcon activated - rewrite any recent action!";
/// Message shown when undo has nothing to restore.
pub const NOTHING_TO_UNDO_TEXT: &str = "Nothing to undo";

/// A roll as handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollReport {
    /// The roll itself.
    pub result: RollResult,
    /// Display line for the roll.
    pub text: String,
    /// How long a host animation should run before showing `text`.
    pub reveal_after: Duration,
}

/// A live character session.
pub struct Session {
    character: Character,
    rolls: RollHistory,
    actions: ActionHistory,
    presets: PresetBook,
    config: SessionConfig,
    source: Dice,
    notifier: Box<dyn Notifier>,
}

/// The session's die source. Counts draws so a seeded sequence can pick up
/// where the previous session stopped.
struct Dice {
    inner: Box<dyn DieSource>,
    draws: u64,
}

impl Dice {
    fn new(inner: Box<dyn DieSource>) -> Self {
        Self { inner, draws: 0 }
    }

    fn seeded(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(Box::new(StdRng::seed_from_u64(seed))),
            None => Self::new(Box::new(StdRng::from_os_rng())),
        }
    }

    fn skip(&mut self, draws: u64) {
        for _ in 0..draws {
            self.unit();
        }
    }
}

impl DieSource for Dice {
    fn unit(&mut self) -> f64 {
        self.draws += 1;
        self.inner.unit()
    }
}

/// Position in a seeded sequence, stored under [`ROLL_CURSOR_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct RollCursor {
    seed: u64,
    draws: u64,
}

impl Session {
    /// Start a session for `character` with empty histories.
    pub fn new(character: Character, config: SessionConfig) -> Self {
        Self {
            character,
            rolls: RollHistory::new(config.roll_history_capacity),
            actions: ActionHistory::new(config.action_history_capacity),
            presets: PresetBook::with_capacity(config.preset_capacity),
            source: Dice::seeded(config.seed),
            notifier: Box::new(Silent),
            config,
        }
    }

    /// Send transient messages to `notifier`.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Roll with `source` instead of the seeded RNG.
    pub fn with_source(mut self, source: impl DieSource + 'static) -> Self {
        self.source = Dice::new(Box::new(source));
        self
    }

    /// Restore a session from a store. Missing keys fall back to defaults.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> SessionResult<Self> {
        let config: SessionConfig = read(store, SETTINGS_KEY)?.unwrap_or_default();
        let character: Character = read(store, CHARACTER_KEY)?.unwrap_or_default();
        let mut session = Self::new(character, config);

        if let Some(mut rolls) = read::<RollHistory, _>(store, ROLL_HISTORY_KEY)? {
            rolls.set_capacity(session.config.roll_history_capacity);
            session.rolls = rolls;
        }
        if let Some(mut actions) = read::<ActionHistory, _>(store, ACTION_HISTORY_KEY)? {
            actions.set_capacity(session.config.action_history_capacity);
            session.actions = actions;
        }
        session.presets = load_presets(store, session.config.preset_capacity);
        let cursor = read::<RollCursor, _>(store, ROLL_CURSOR_KEY)?;
        if let Some(cursor) = cursor.filter(|c| Some(c.seed) == session.config.seed) {
            session.source.skip(cursor.draws);
        }

        tracing::debug!(
            character = %session.character.name,
            rolls = session.rolls.len(),
            actions = session.actions.len(),
            presets = session.presets.len(),
            "session loaded"
        );
        Ok(session)
    }

    /// Write the whole session to a store.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> SessionResult<()> {
        store.set(SETTINGS_KEY, serde_json::to_value(&self.config)?)?;
        store.set(CHARACTER_KEY, serde_json::to_value(&self.character)?)?;
        store.set(ROLL_HISTORY_KEY, serde_json::to_value(&self.rolls)?)?;
        store.set(ACTION_HISTORY_KEY, serde_json::to_value(&self.actions)?)?;
        match self.config.seed {
            Some(seed) => {
                let cursor = RollCursor {
                    seed,
                    draws: self.source.draws,
                };
                store.set(ROLL_CURSOR_KEY, serde_json::to_value(cursor)?)?;
            }
            None => store.remove(ROLL_CURSOR_KEY)?,
        }
        save_presets(store, &self.presets)
    }

    /// The live character.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Rolls from newest to oldest.
    pub fn roll_history(&self) -> &RollHistory {
        &self.rolls
    }

    /// Undo snapshots from newest to oldest.
    pub fn action_history(&self) -> &ActionHistory {
        &self.actions
    }

    /// The preset book.
    pub fn presets(&self) -> &PresetBook {
        &self.presets
    }

    /// The active configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the configuration, resizing the logs and the preset book and
    /// reseeding when the seed changed.
    pub fn set_config(&mut self, config: SessionConfig) {
        self.rolls.set_capacity(config.roll_history_capacity);
        self.actions.set_capacity(config.action_history_capacity);
        self.presets.set_capacity(config.preset_capacity);
        if config.seed != self.config.seed {
            self.source = Dice::seeded(config.seed);
        }
        self.config = config;
    }

    // ------------------------------------------------------------------
    // Rolling
    // ------------------------------------------------------------------

    /// Roll a formula and record it. Conditions on the character that match
    /// the label are folded in.
    pub fn roll(&mut self, formula: &str, label: Option<&str>) -> SessionResult<RollReport> {
        let kind = label.map_or(RollKind::General, RollKind::infer);
        let result = self.evaluate(formula, label, kind)?;
        let text = result.format();
        Ok(self.record(result, text))
    }

    /// Roll a formula without recording it anywhere.
    pub fn preview(&mut self, formula: &str) -> SessionResult<RollReport> {
        let result = self.evaluate(formula, None, RollKind::General)?;
        let text = result.format();
        Ok(self.report(result, text))
    }

    /// Roll a preset by name and record it.
    pub fn roll_preset(&mut self, name: &str) -> SessionResult<RollReport> {
        let result = self.presets.roll(name, &mut self.source)?;
        let result = fold_situational(result, &self.character, RollKind::infer(name));
        let text = result.format();
        Ok(self.record(result, text))
    }

    /// Roll the equipped weapon's damage and record it.
    pub fn roll_weapon_damage(&mut self) -> SessionResult<RollReport> {
        let weapon = self
            .character
            .equipped_weapon()
            .ok_or(SessionError::NoEquippedWeapon)?;
        let formula = weapon
            .damage
            .clone()
            .ok_or_else(|| SessionError::NoDamageFormula(weapon.name.clone()))?;
        let label = format!("{} Damage", weapon.name);
        let result = self.evaluate(&formula, Some(&label), RollKind::Damage)?;
        let text = result.format();
        Ok(self.record(result, text))
    }

    /// Build an assist request, deriving the bond bonus from the
    /// character's unresolved bonds with `helper` when none is given.
    pub fn assist_request(
        &self,
        kind: AssistKind,
        helper: &str,
        bond_bonus: Option<i32>,
    ) -> AssistRequest {
        let bonus = bond_bonus.unwrap_or_else(|| {
            i32::try_from(self.character.bond_count(helper)).unwrap_or(i32::MAX)
        });
        AssistRequest::new(kind, helper, bonus)
    }

    /// Make a stat check, optionally with a helper, and record it. A miss
    /// awards XP when enabled.
    pub fn stat_check(
        &mut self,
        stat: Stat,
        assist: Option<AssistRequest>,
    ) -> (RollReport, CheckOutcome) {
        let mut rolled = StatCheck::for_character(&self.character, stat).roll(&mut self.source);
        if let Some(request) = assist {
            let outcome = resolve_assist(&request, self.config.assist_rule, &mut self.source);
            rolled.assist(outcome);
        }
        let outcome = rolled.finish(self.config.auto_xp_on_miss);
        outcome.apply(&mut self.character);
        tracing::debug!(
            stat = %stat,
            total = outcome.result.total(),
            band = %outcome.band,
            xp = outcome.xp_award,
            "stat check"
        );
        let report = self.record(outcome.result.clone(), outcome.summary());
        (report, outcome)
    }

    /// Roll a stat check without recording it or awarding XP.
    pub fn preview_check(&mut self, stat: Stat) -> RollReport {
        let result = StatCheck::for_character(&self.character, stat)
            .roll(&mut self.source)
            .discard();
        let text = result.format();
        self.report(result, text)
    }

    /// Roll HP for a level up. The character is unchanged until
    /// [`apply_hp_gain`](Self::apply_hp_gain).
    pub fn roll_hp_gain(&mut self) -> (RollReport, HpGain) {
        let con = self.character.stat_modifier(Stat::Con);
        let gain = roll_hp_gain(con, &mut self.source);
        let report = self.record(gain.roll.clone(), gain.summary());
        (report, gain)
    }

    /// Raise max and current HP by a rolled gain.
    pub fn apply_hp_gain(&mut self, gain: &HpGain) {
        self.mutate("Level Up HP", |c| gain.apply(c));
        self.notify(Notice::transient(
            format!("Max HP is now {}", self.character.max_hp),
            self.config.notice_duration(),
        ));
    }

    /// Roll Last Breath. When the journey ends the character is marked
    /// deceased, after a snapshot so it can be undone.
    pub fn last_breath(&mut self) -> (RollReport, LastBreath) {
        let breath = roll_last_breath(&mut self.source);
        if breath.outcome == LastBreathOutcome::JourneyEnds && !self.character.deceased {
            self.mutate("Last Breath", |c| breath.apply(c));
        }
        let text = format!("{} {}", breath.roll.format(), breath.outcome.message());
        let report = self.record(breath.roll.clone(), text);
        (report, breath)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Snapshot the character under `action`, then mutate it.
    pub fn mutate<R>(&mut self, action: &str, f: impl FnOnce(&mut Character) -> R) -> R {
        self.actions.snapshot(action, &self.character);
        f(&mut self.character)
    }

    /// Take damage after armor. Returns the HP lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        self.mutate("HP Change", |c| c.take_damage(amount))
    }

    /// Heal up to max HP. Returns the HP restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.mutate("HP Change", |c| c.heal(amount))
    }

    /// Set current HP, clamped to `0..=max_hp`. Returns the new value.
    pub fn set_hp(&mut self, hp: i32) -> i32 {
        self.mutate("HP Change", |c| {
            let delta = hp.saturating_sub(c.hp);
            c.adjust_hp(delta)
        })
    }

    /// Toggle a status effect. Returns whether it is now active.
    pub fn toggle_status(&mut self, effect: StatusEffect) -> bool {
        self.mutate("Status Change", |c| c.toggle_status(effect))
    }

    /// Toggle a debility. Returns whether it is now active.
    pub fn toggle_debility(&mut self, debility: Debility) -> bool {
        self.mutate("Debility Change", |c| c.toggle_debility(debility))
    }

    /// Spend a Chrono-Retcon charge. Returns false, changing nothing, when
    /// the ring is spent.
    pub fn use_chrono_retcon(&mut self) -> bool {
        if self.character.resources.chrono_uses == 0 {
            self.notify(Notice::transient(NO_USES_TEXT, self.config.notice_duration()));
            return false;
        }
        self.mutate("Chrono-Retcon Used", |c| c.resources.chrono_uses -= 1);
        self.notify(Notice::transient(
            RETCON_TEXT,
            self.config.retcon_notice_duration(),
        ));
        true
    }

    /// Restore the character from the newest snapshot. Returns the undone
    /// action, or `None` when there was nothing to undo.
    pub fn undo(&mut self) -> Option<String> {
        let character = &mut self.character;
        let undone = self.actions.undo(|state| *character = state);
        let text = match &undone {
            Some(action) => format!("\u{21B6} Undid: {action}"),
            None => NOTHING_TO_UNDO_TEXT.to_string(),
        };
        self.notify(Notice::transient(text, self.config.notice_duration()));
        undone
    }

    /// Replace the character wholesale, snapshotting the old one first.
    pub fn replace_character(&mut self, character: Character) {
        self.mutate("Character Replaced", |c| *c = character);
    }

    // ------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------

    /// Add or replace a preset.
    pub fn add_preset(&mut self, name: &str, formula: &str) -> PresetOutcome {
        self.presets.add(name, formula)
    }

    /// Remove a preset. Returns true if one was removed.
    pub fn remove_preset(&mut self, name: &str) -> bool {
        self.presets.remove(name)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn evaluate(
        &mut self,
        formula: &str,
        label: Option<&str>,
        kind: RollKind,
    ) -> SessionResult<RollResult> {
        let mut result = roll_formula(formula.trim(), &mut self.source)?;
        if let Some(label) = label {
            result = result.with_label(label);
        }
        Ok(fold_situational(result, &self.character, kind))
    }

    fn record(&mut self, result: RollResult, text: String) -> RollReport {
        self.rolls.push(result.clone());
        self.notify(Notice::sticky(text.clone()));
        self.report(result, text)
    }

    fn report(&self, result: RollResult, text: String) -> RollReport {
        RollReport {
            result,
            text,
            reveal_after: self.config.reveal_delay(),
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notifier.notify(&notice);
    }
}

fn fold_situational(result: RollResult, character: &Character, kind: RollKind) -> RollResult {
    let situational = Situational::for_roll(character, kind);
    if situational.is_empty() {
        return result;
    }
    let mut result = result.with_adjustment(situational.modifier, None);
    for note in situational.notes {
        result = result.with_note(note);
    }
    result
}

fn read<T, S>(store: &S, key: &str) -> SessionResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
