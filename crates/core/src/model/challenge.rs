use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{ChallengeId, SlotIndex};

//
// ─── GAME KIND ─────────────────────────────────────────────────────────────────
//

/// Tag distinguishing the four mini-game families.
///
/// Every session is parameterized by exactly one kind; the kind decides
/// which validation rule and score policy apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Question with several options, exactly one correct.
    MultipleChoice,
    /// Statement judged true or false.
    TrueFalse,
    /// Items placed into numbered target slots.
    Sequencing,
    /// Subject guessed from progressively revealed clues.
    Guessing,
}

//
// ─── CHALLENGE RECORDS ─────────────────────────────────────────────────────────
//

/// A multiple-choice question: prompt, option list, and the correct index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceChallenge {
    pub id: ChallengeId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: Option<String>,
}

impl ChoiceChallenge {
    /// Build a validated multiple-choice challenge.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` if the prompt is blank, fewer than two
    /// options are given, or `correct_index` is out of range.
    pub fn new(
        id: ChallengeId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
    ) -> Result<Self, ChallengeError> {
        let record = Self {
            id,
            prompt: prompt.into(),
            options,
            correct_index,
            explanation,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the invariants the engine relies on for validation.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` when any field the validator reads is unusable.
    pub fn validate(&self) -> Result<(), ChallengeError> {
        if self.prompt.trim().is_empty() {
            return Err(ChallengeError::BlankPrompt { id: self.id });
        }
        if self.options.len() < 2 {
            return Err(ChallengeError::TooFewOptions {
                id: self.id,
                len: self.options.len(),
            });
        }
        if self.correct_index >= self.options.len() {
            return Err(ChallengeError::CorrectIndexOutOfRange {
                id: self.id,
                index: self.correct_index,
                len: self.options.len(),
            });
        }
        Ok(())
    }
}

/// A true/false statement with its stored answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementChallenge {
    pub id: ChallengeId,
    pub statement: String,
    pub answer: bool,
    pub explanation: Option<String>,
}

impl StatementChallenge {
    /// Build a validated true/false challenge.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::BlankPrompt` if the statement is blank.
    pub fn new(
        id: ChallengeId,
        statement: impl Into<String>,
        answer: bool,
        explanation: Option<String>,
    ) -> Result<Self, ChallengeError> {
        let record = Self {
            id,
            statement: statement.into(),
            answer,
            explanation,
        };
        record.validate()?;
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::BlankPrompt` if the statement is blank.
    pub fn validate(&self) -> Result<(), ChallengeError> {
        if self.statement.trim().is_empty() {
            return Err(ChallengeError::BlankPrompt { id: self.id });
        }
        Ok(())
    }
}

/// An item to be placed into its target slot in a sequencing puzzle.
///
/// `display` carries whatever the presentation layer shows on the card;
/// the engine only reads `id` and `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementChallenge {
    pub id: ChallengeId,
    pub target: SlotIndex,
    pub display: String,
}

impl PlacementChallenge {
    /// Build a validated placement item.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::BlankPrompt` if the display text is blank.
    pub fn new(
        id: ChallengeId,
        target: SlotIndex,
        display: impl Into<String>,
    ) -> Result<Self, ChallengeError> {
        let record = Self {
            id,
            target,
            display: display.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::BlankPrompt` if the display text is blank.
    pub fn validate(&self) -> Result<(), ChallengeError> {
        if self.display.trim().is_empty() {
            return Err(ChallengeError::BlankPrompt { id: self.id });
        }
        Ok(())
    }
}

/// A guessing subject with an ordered list of clues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueChallenge {
    pub id: ChallengeId,
    pub subject: String,
    pub clues: Vec<String>,
}

impl ClueChallenge {
    /// Build a validated guessing challenge.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` if the subject is blank or no clues are given.
    pub fn new(
        id: ChallengeId,
        subject: impl Into<String>,
        clues: Vec<String>,
    ) -> Result<Self, ChallengeError> {
        let record = Self {
            id,
            subject: subject.into(),
            clues,
        };
        record.validate()?;
        Ok(record)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError` if the subject is blank or no clues are given.
    pub fn validate(&self) -> Result<(), ChallengeError> {
        if self.subject.trim().is_empty() {
            return Err(ChallengeError::BlankPrompt { id: self.id });
        }
        if self.clues.is_empty() {
            return Err(ChallengeError::NoClues { id: self.id });
        }
        Ok(())
    }

    /// Maximum points a fully unrevealed answer can earn: one per clue.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        u32::try_from(self.clues.len()).unwrap_or(u32::MAX)
    }
}

//
// ─── CHALLENGE ─────────────────────────────────────────────────────────────────
//

/// One unit of question/puzzle content, immutable once drawn into a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Challenge {
    MultipleChoice(ChoiceChallenge),
    TrueFalse(StatementChallenge),
    Sequencing(PlacementChallenge),
    Guessing(ClueChallenge),
}

impl Challenge {
    #[must_use]
    pub fn id(&self) -> ChallengeId {
        match self {
            Challenge::MultipleChoice(c) => c.id,
            Challenge::TrueFalse(c) => c.id,
            Challenge::Sequencing(c) => c.id,
            Challenge::Guessing(c) => c.id,
        }
    }

    #[must_use]
    pub fn kind(&self) -> GameKind {
        match self {
            Challenge::MultipleChoice(_) => GameKind::MultipleChoice,
            Challenge::TrueFalse(_) => GameKind::TrueFalse,
            Challenge::Sequencing(_) => GameKind::Sequencing,
            Challenge::Guessing(_) => GameKind::Guessing,
        }
    }

    /// Re-check invariants, e.g. after deserializing a content file.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` when any field the engine reads is unusable.
    pub fn validate(&self) -> Result<(), ChallengeError> {
        match self {
            Challenge::MultipleChoice(c) => c.validate(),
            Challenge::TrueFalse(c) => c.validate(),
            Challenge::Sequencing(c) => c.validate(),
            Challenge::Guessing(c) => c.validate(),
        }
    }
}

//
// ─── CHALLENGE VALIDATION ERRORS ───────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("challenge {id} has a blank prompt")]
    BlankPrompt { id: ChallengeId },

    #[error("challenge {id} has {len} options, at least 2 required")]
    TooFewOptions { id: ChallengeId, len: usize },

    #[error("challenge {id} correct index {index} out of range for {len} options")]
    CorrectIndexOutOfRange {
        id: ChallengeId,
        index: usize,
        len: usize,
    },

    #[error("challenge {id} has no clues")]
    NoClues { id: ChallengeId },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
