//! Content-source interface between the engine and the literal datasets.
//!
//! The engine never owns question text; a game screen hands it a
//! `ContentSource` that supplies the master challenge set for one game
//! kind. Two implementations are provided: an in-memory one for tests and
//! programmatic content, and a JSON-backed one for bundled content files.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use quiz_core::model::{Challenge, ChallengeError, ChallengeId, GameKind};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("no content available for {kind:?}")]
    NoContent { kind: GameKind },
    #[error("duplicate challenge id {id} in content set")]
    DuplicateId { id: ChallengeId },
    #[error("expected {expected:?} content, found {found:?}")]
    KindMismatch { expected: GameKind, found: GameKind },
    #[error(transparent)]
    Invalid(#[from] ChallengeError),
    #[error("malformed content file: {0}")]
    Malformed(#[from] serde_json::Error),
}

//
// ─── CONTENT SOURCE ────────────────────────────────────────────────────────────
//

/// Supplier of the master challenge set for a game instance.
pub trait ContentSource: Send + Sync {
    /// Returns every challenge of the given kind in this content set.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::NoContent` when the set holds nothing of the
    /// requested kind.
    fn challenges(&self, kind: GameKind) -> Result<Vec<Challenge>, ContentError>;
}

fn check_set(challenges: &[Challenge]) -> Result<(), ContentError> {
    let mut seen = HashSet::new();
    for challenge in challenges {
        challenge.validate()?;
        if !seen.insert(challenge.id()) {
            return Err(ContentError::DuplicateId {
                id: challenge.id(),
            });
        }
    }
    Ok(())
}

//
// ─── IN-MEMORY SOURCE ──────────────────────────────────────────────────────────
//

/// Content source backed by challenge lists held in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContent {
    sets: HashMap<GameKind, Vec<Challenge>>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a challenge set, replacing any previous set of the same kind.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` when a record is invalid, carries a duplicate
    /// id, or does not match `kind`.
    pub fn with_set(
        mut self,
        kind: GameKind,
        challenges: Vec<Challenge>,
    ) -> Result<Self, ContentError> {
        check_set(&challenges)?;
        // A mixed list would let a session of one kind draw foreign rounds.
        for challenge in &challenges {
            if challenge.kind() != kind {
                return Err(ContentError::KindMismatch {
                    expected: kind,
                    found: challenge.kind(),
                });
            }
        }
        self.sets.insert(kind, challenges);
        Ok(self)
    }
}

impl ContentSource for InMemoryContent {
    fn challenges(&self, kind: GameKind) -> Result<Vec<Challenge>, ContentError> {
        match self.sets.get(&kind) {
            Some(set) if !set.is_empty() => Ok(set.clone()),
            _ => Err(ContentError::NoContent { kind }),
        }
    }
}

//
// ─── JSON SOURCE ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct ContentFile {
    challenges: Vec<Challenge>,
}

/// Content source parsed from a bundled JSON document.
///
/// The document shape is `{"challenges": [...]}` where each entry carries a
/// `"kind"` tag matching the `Challenge` serde representation. Entries of
/// every kind may share one file; `challenges()` filters by kind.
#[derive(Debug, Clone)]
pub struct JsonContent {
    by_kind: HashMap<GameKind, Vec<Challenge>>,
}

impl JsonContent {
    /// Parse and validate a JSON content document.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Malformed` for unparsable JSON and the usual
    /// validation errors for bad records.
    pub fn parse(document: &str) -> Result<Self, ContentError> {
        let file: ContentFile = serde_json::from_str(document)?;
        check_set(&file.challenges)?;

        let mut by_kind: HashMap<GameKind, Vec<Challenge>> = HashMap::new();
        for challenge in file.challenges {
            by_kind.entry(challenge.kind()).or_default().push(challenge);
        }
        Ok(Self { by_kind })
    }
}

impl ContentSource for JsonContent {
    fn challenges(&self, kind: GameKind) -> Result<Vec<Challenge>, ContentError> {
        match self.by_kind.get(&kind) {
            Some(set) if !set.is_empty() => Ok(set.clone()),
            _ => Err(ContentError::NoContent { kind }),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
