//! Builds the randomized working set for one session.
//!
//! The master set stays untouched; the builder shuffles a copy, truncates
//! it to the configured round count, and (for guessing games) samples a
//! small list of decoy identities per round.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use quiz_core::model::{Challenge, ChallengeId};

use crate::error::SessionError;

//
// ─── POOL ──────────────────────────────────────────────────────────────────────
//

/// One drawn challenge plus the pre-shuffled choice list for its round.
///
/// `choices` is empty unless decoy sampling was requested; when present it
/// contains the correct id and `decoys` others in unpredictable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    challenge: Challenge,
    choices: Vec<ChallengeId>,
}

impl PoolEntry {
    #[must_use]
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    #[must_use]
    pub fn choices(&self) -> &[ChallengeId] {
        &self.choices
    }
}

/// Fixed-size working set of challenges for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    entries: Vec<PoolEntry>,
}

impl Pool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PoolEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = &PoolEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub(crate) fn into_entries(self) -> Vec<PoolEntry> {
        self.entries
    }
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Builds a session pool from a master challenge set.
pub struct PoolBuilder<'a> {
    master: &'a [Challenge],
    round_count: Option<usize>,
    decoys: usize,
    seed: Option<u64>,
}

impl<'a> PoolBuilder<'a> {
    #[must_use]
    pub fn new(master: &'a [Challenge]) -> Self {
        Self {
            master,
            round_count: None,
            decoys: 0,
            seed: None,
        }
    }

    /// Cap the pool at `count` rounds; the pool still never exceeds the
    /// master set size.
    #[must_use]
    pub fn with_round_count(mut self, count: usize) -> Self {
        self.round_count = Some(count);
        self
    }

    /// Sample `count` decoy identities per round from the rest of the
    /// master set (used by guessing games).
    #[must_use]
    pub fn with_decoys(mut self, count: usize) -> Self {
        self.decoys = count;
        self
    }

    /// Seed the shuffle for deterministic pools in tests.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Shuffle, truncate, and sample decoys.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the master set is empty; a
    /// session cannot start without content.
    pub fn build(self) -> Result<Pool, SessionError> {
        if self.master.is_empty() {
            return Err(SessionError::Empty);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut drawn: Vec<Challenge> = self.master.to_vec();
        drawn.shuffle(&mut rng);

        let count = self
            .round_count
            .unwrap_or(drawn.len())
            .min(drawn.len());
        drawn.truncate(count);

        let entries = drawn
            .into_iter()
            .map(|challenge| {
                let choices = if self.decoys > 0 {
                    sample_choices(self.master, challenge.id(), self.decoys, &mut rng)
                } else {
                    Vec::new()
                };
                PoolEntry { challenge, choices }
            })
            .collect();

        Ok(Pool { entries })
    }
}

/// Draw `decoys` distinct ids other than `correct`, mix in the correct id,
/// and shuffle so its position is unpredictable.
fn sample_choices(
    master: &[Challenge],
    correct: ChallengeId,
    decoys: usize,
    rng: &mut StdRng,
) -> Vec<ChallengeId> {
    let others: Vec<ChallengeId> = master
        .iter()
        .map(Challenge::id)
        .filter(|id| *id != correct)
        .collect();

    let mut choices: Vec<ChallengeId> = others.choose_multiple(rng, decoys).copied().collect();
    choices.push(correct);
    choices.shuffle(rng);
    choices
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
