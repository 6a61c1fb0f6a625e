use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

use crate::error::WordBankError;
use crate::words::SecretWord;

/// Candidate words for a session, drawn without replacement.
///
/// A drawn word is never handed out again until the bank is reset or
/// refilled. The random source is injected so that tests can seed it.
#[derive(Debug)]
pub struct WordBank<R: Rng = StdRng> {
    source: Vec<SecretWord>,
    remaining: Vec<SecretWord>,
    rng: R,
}

impl WordBank<StdRng> {
    /// Bank backed by OS entropy
    pub fn from_entropy(words: Vec<SecretWord>) -> Result<Self, WordBankError> {
        Self::new(words, StdRng::from_entropy())
    }

    /// Deterministic bank for reproducible sessions and tests
    pub fn with_seed(words: Vec<SecretWord>, seed: u64) -> Result<Self, WordBankError> {
        Self::new(words, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WordBank<R> {
    pub fn new(words: Vec<SecretWord>, rng: R) -> Result<Self, WordBankError> {
        let source = dedup(words);
        if source.is_empty() {
            return Err(WordBankError::NoWords);
        }

        Ok(Self {
            remaining: source.clone(),
            source,
            rng,
        })
    }

    /// Remove and return a uniformly chosen word
    pub fn draw(&mut self) -> Result<SecretWord, WordBankError> {
        if self.remaining.is_empty() {
            return Err(WordBankError::Empty);
        }

        let idx = self.rng.gen_range(0..self.remaining.len());
        let word = self.remaining.swap_remove(idx);
        debug!(remaining = self.remaining.len(), "drew word");
        Ok(word)
    }

    /// Number of words left to draw
    pub fn count(&self) -> usize {
        self.remaining.len()
    }

    /// Size of the full list the bank refills from
    pub fn capacity(&self) -> usize {
        self.source.len()
    }

    /// Replace the full list and make every word drawable again.
    /// An empty list is refused and leaves the bank as it was.
    pub fn reset(&mut self, words: Vec<SecretWord>) -> Result<(), WordBankError> {
        let source = dedup(words);
        if source.is_empty() {
            return Err(WordBankError::NoWords);
        }

        self.source = source;
        self.refill();
        Ok(())
    }

    /// Make every word of the current list drawable again
    pub fn refill(&mut self) {
        self.remaining = self.source.clone();
        info!(count = self.remaining.len(), "word bank refilled");
    }
}

fn dedup(words: Vec<SecretWord>) -> Vec<SecretWord> {
    words.into_iter().unique().collect()
}
