pub mod check;
pub mod config;
pub mod history;
pub mod init;
pub mod preset;
pub mod protocol;
pub mod roll;
pub mod show;
pub mod vitals;

use std::path::Path;
use std::sync::mpsc::{Receiver, channel};

use colored::Colorize;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};

use tally_mechanics::MechError;
use tally_session::{JsonFileStore, Notice, Session, SessionError};

/// A session loaded from its store file, saved back by [`Loaded::save`].
pub struct Loaded {
    store: JsonFileStore,
    pub session: Session,
    notices: Receiver<Notice>,
}

impl Loaded {
    /// Open the store file and restore the session from it.
    pub fn open(path: &Path) -> Result<Self, String> {
        let store = JsonFileStore::open(path)
            .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
        let (tx, notices) = channel();
        let session = Session::load(&store)
            .map_err(|e| format!("cannot load {}: {e}", path.display()))?
            .with_notifier(tx);
        tracing::debug!(
            path = %path.display(),
            character = %session.character().name,
            "opened store"
        );
        Ok(Self {
            store,
            session,
            notices,
        })
    }

    /// Whether the store already holds a character.
    pub fn has_character(&self) -> bool {
        self.store.contains(tally_session::store::CHARACTER_KEY)
    }

    /// Print pending transient messages and write the session back.
    pub fn save(mut self) -> Result<(), String> {
        for notice in self.notices.try_iter() {
            if notice.duration.is_some() {
                println!("  {}", notice.text.yellow());
            }
        }
        self.session
            .save(&mut self.store)
            .map_err(|e| format!("cannot save {}: {e}", self.store.path().display()))?;
        tracing::debug!(path = %self.store.path().display(), "saved store");
        Ok(())
    }
}

/// Turn a session error into the message `main` prints. Formula errors also
/// get a diagnostic pointing at the offending character.
pub fn describe(err: SessionError) -> String {
    if let SessionError::Mechanics(MechError::InvalidFormula {
        formula,
        reason,
        position,
    }) = &err
    {
        eprint!("{}", render_formula_error(formula, reason, *position));
    }
    err.to_string()
}

#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("invalid formula")]
#[diagnostic(
    code(tally::invalid_formula),
    help("formulas look like d20, 2d6+3 or 4d6-2")
)]
struct FormulaDiagnostic {
    #[source_code]
    src: NamedSource<String>,
    #[label("{reason}")]
    span: SourceSpan,
    reason: String,
}

/// Render an invalid formula as a miette report with the offending
/// character labelled.
pub fn render_formula_error(formula: &str, reason: &str, position: usize) -> String {
    let len = usize::from(position < formula.len());
    let diagnostic = FormulaDiagnostic {
        src: NamedSource::new("formula", formula.to_string()),
        span: (position.min(formula.len()), len).into(),
        reason: reason.to_string(),
    };
    let mut out = String::new();
    GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
        .render_report(&mut out, &diagnostic)
        .ok();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_report_points_at_position() {
        let out = render_formula_error("2x6", "expected 'd'", 1);
        assert!(out.contains("invalid formula"));
        assert!(out.contains("expected 'd'"));
        assert!(out.contains("2x6"));
    }

    #[test]
    fn formula_report_at_end_of_input() {
        let out = render_formula_error("2d", "expected die size after 'd'", 2);
        assert!(out.contains("expected die size"));
    }
}
