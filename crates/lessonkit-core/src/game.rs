//! Sequencing game engine.
//!
//! A [`GameSession`] holds one attempt at rebuilding the canonical order of a
//! [`Catalog`]. Stages move between an unordered pool and the ordered
//! `placed` sequence; nothing is judged until [`GameSession::evaluate`].
//!
//! A session is `Correct` iff `placed[i].correct_order == i + 1` for every
//! index `i`. `Correct` is terminal until [`GameSession::reset`]. An
//! `Incorrect` verdict only describes the last submission: the next
//! `place`/`unplace` puts the session back in progress.

use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::error::GameError;
use crate::model::{Catalog, Stage};
use crate::traits::{CompletionNotifier, NoopNotifier};

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    InProgress,
    Correct,
    Incorrect,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Correct => write!(f, "correct"),
            Outcome::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// One user's attempt at ordering a catalog.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    catalog: Arc<Catalog>,
    pool: Vec<Stage>,
    placed: Vec<Stage>,
    outcome: Outcome,
    attempts: u32,
}

impl GameSession {
    /// Start a session with the pool shuffled by the thread-local RNG.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_rng(catalog, &mut rand::rng())
    }

    /// Start a session with the pool shuffled by `rng`.
    pub fn with_rng<R: Rng + ?Sized>(catalog: Arc<Catalog>, rng: &mut R) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            catalog,
            pool: Vec::new(),
            placed: Vec::new(),
            outcome: Outcome::InProgress,
            attempts: 0,
        };
        session.reset_with_rng(rng);
        session
    }

    /// Reshuffle every stage back into the pool and clear the outcome.
    pub fn reset(&mut self) {
        self.reset_with_rng(&mut rand::rng());
    }

    pub fn reset_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool = self.catalog.stages().to_vec();
        self.pool.shuffle(rng);
        self.placed.clear();
        self.outcome = Outcome::InProgress;
        self.attempts = 0;
        tracing::debug!(session = %self.id, catalog = %self.catalog.id, "session reset");
    }

    /// Move the stage with `stage_id` from the pool to the end of `placed`.
    pub fn place(&mut self, stage_id: &str) -> Result<&Stage, GameError> {
        self.ensure_editable()?;

        let index = self
            .pool
            .iter()
            .position(|s| s.id == stage_id)
            .ok_or_else(|| {
                if self.placed.iter().any(|s| s.id == stage_id) {
                    GameError::invalid(format!("stage '{stage_id}' is already placed"))
                } else {
                    GameError::invalid(format!("unknown stage '{stage_id}'"))
                }
            })?;

        let stage = self.pool.remove(index);
        self.placed.push(stage);
        self.outcome = Outcome::InProgress;
        Ok(&self.placed[self.placed.len() - 1])
    }

    /// Take the stage at `index` out of `placed` and return it to the pool.
    pub fn unplace(&mut self, index: usize) -> Result<Stage, GameError> {
        self.ensure_editable()?;

        if index >= self.placed.len() {
            return Err(GameError::invalid(format!(
                "index {index} out of range for {} placed stage(s)",
                self.placed.len()
            )));
        }

        let stage = self.placed.remove(index);
        self.pool.push(stage.clone());
        self.outcome = Outcome::InProgress;
        Ok(stage)
    }

    /// Judge the placed sequence.
    ///
    /// Requires every stage to be placed. A transition to `Correct` calls
    /// `notifier` once; evaluating an already-solved session returns
    /// `Correct` without calling it again.
    pub fn evaluate(&mut self, notifier: &dyn CompletionNotifier) -> Result<Outcome, GameError> {
        if self.outcome == Outcome::Correct {
            return Ok(Outcome::Correct);
        }

        let total = self.catalog.len();
        if self.placed.len() != total {
            return Err(GameError::IncompleteSubmission {
                placed: self.placed.len(),
                total,
            });
        }

        self.attempts += 1;
        self.outcome = if self.first_misplaced().is_none() {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        tracing::debug!(
            session = %self.id,
            attempt = self.attempts,
            outcome = %self.outcome,
            "sequence evaluated"
        );

        if self.outcome == Outcome::Correct {
            notifier.on_complete(self);
        }

        Ok(self.outcome)
    }

    /// Index of the first placed stage that is out of canonical position.
    pub fn first_misplaced(&self) -> Option<usize> {
        self.placed
            .iter()
            .enumerate()
            .position(|(i, s)| s.correct_order as usize != i + 1)
    }

    /// `(placed, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.placed.len(), self.catalog.len())
    }

    pub fn is_complete(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pool(&self) -> &[Stage] {
        &self.pool
    }

    pub fn placed(&self) -> &[Stage] {
        &self.placed
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Evaluations since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    fn ensure_editable(&self) -> Result<(), GameError> {
        if self.outcome == Outcome::Correct {
            return Err(GameError::invalid(
                "sequence is already solved; reset to play again",
            ));
        }
        Ok(())
    }
}

/// A catalog, its active session, and whoever wants to hear about a win.
pub struct SequenceGame {
    catalog: Arc<Catalog>,
    session: GameSession,
    notifier: Box<dyn CompletionNotifier>,
}

impl SequenceGame {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_notifier(catalog, Box::new(NoopNotifier))
    }

    pub fn with_notifier(catalog: Catalog, notifier: Box<dyn CompletionNotifier>) -> Self {
        let catalog = Arc::new(catalog);
        let session = GameSession::new(Arc::clone(&catalog));
        Self {
            catalog,
            session,
            notifier,
        }
    }

    /// Replace the session's shuffle with one drawn from `rng`.
    pub fn reshuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.session.reset_with_rng(rng);
    }

    pub fn place(&mut self, stage_id: &str) -> Result<&Stage, GameError> {
        self.session.place(stage_id)
    }

    pub fn unplace(&mut self, index: usize) -> Result<Stage, GameError> {
        self.session.unplace(index)
    }

    pub fn evaluate(&mut self) -> Result<Outcome, GameError> {
        self.session.evaluate(self.notifier.as_ref())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
