use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::InvalidAction;
use crate::words::SecretWord;

/// Bad guesses allowed before the round is lost
pub const MAX_BAD_GUESSES: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
    Forfeited,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

/// One position of the secret word as the player sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Revealed(char),
}

impl Cell {
    pub fn is_revealed(&self) -> bool {
        matches!(self, Cell::Revealed(_))
    }

    /// Letter to draw, `_` while still hidden
    pub fn symbol(&self) -> char {
        match self {
            Cell::Blank => '_',
            Cell::Revealed(c) => *c,
        }
    }
}

/// Renderable copy of a round, produced after every call on the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pattern: Vec<Cell>,
    pub message: String,
    pub status: RoundStatus,
    pub bad_guesses: u8,
    pub remaining_bad_guesses: u8,
    /// Every letter tried this round, alphabetical
    pub guessed: Vec<char>,
    /// Tried letters that are not in the word, alphabetical
    pub misses: Vec<char>,
    /// The full word, present once the round is over
    pub secret: Option<String>,
    /// Set when the call that produced this snapshot was ignored
    pub rejected: Option<InvalidAction>,
}

impl Snapshot {
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    /// Pattern as shown to the player, e.g. `C A _`
    pub fn pattern_text(&self) -> String {
        let symbols: Vec<String> = self.pattern.iter().map(|c| c.symbol().to_string()).collect();
        symbols.join(" ")
    }
}

/// State machine for a single round of hangman
#[derive(Debug, Clone)]
pub struct GameSession {
    secret: SecretWord,
    revealed: Vec<bool>,
    guessed: BTreeSet<char>,
    bad_guesses: u8,
    status: RoundStatus,
    message: String,
}

impl GameSession {
    pub fn new(word: SecretWord) -> Self {
        let mut session = Self {
            revealed: Vec::new(),
            secret: word.clone(),
            guessed: BTreeSet::new(),
            bad_guesses: 0,
            status: RoundStatus::InProgress,
            message: String::new(),
        };
        session.start_round(word);
        session
    }

    /// Begin a fresh round with `word`, discarding everything from the last one
    pub fn start_round(&mut self, word: SecretWord) -> Snapshot {
        self.revealed = vec![false; word.len()];
        self.guessed.clear();
        self.bad_guesses = 0;
        self.status = RoundStatus::InProgress;
        self.message = format!(
            "The word has {} letters. Let's play Hangman!",
            word.len()
        );
        self.secret = word;

        info!(letters = self.secret.len(), "round started");
        self.snapshot()
    }

    pub fn guess_letter(&mut self, letter: char) -> Snapshot {
        match self.apply_guess(letter) {
            Ok(()) => self.snapshot(),
            Err(reason) => {
                debug!(%letter, %reason, "guess ignored");
                self.rejected(reason)
            }
        }
    }

    fn apply_guess(&mut self, letter: char) -> Result<(), InvalidAction> {
        if !letter.is_ascii_alphabetic() {
            return Err(InvalidAction::NotALetter { found: letter });
        }
        if self.is_complete() {
            return Err(InvalidAction::RoundOver);
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Err(InvalidAction::AlreadyGuessed { letter });
        }

        let mut hits = 0;
        for (flag, c) in self.revealed.iter_mut().zip(self.secret.letters()) {
            if c == letter {
                *flag = true;
                hits += 1;
            }
        }

        if hits > 0 {
            debug!(%letter, hits, "hit");
            self.message = format!("Yes, {letter} is in the word. Pick your next letter.");
            if self.revealed.iter().all(|r| *r) {
                self.finish(RoundStatus::Won);
            }
        } else {
            self.bad_guesses += 1;
            debug!(%letter, bad_guesses = self.bad_guesses, "miss");
            self.message = format!("Sorry, {letter} is not in the word. Pick your next letter.");
            if self.bad_guesses >= MAX_BAD_GUESSES {
                self.finish(RoundStatus::Lost);
            }
        }

        Ok(())
    }

    /// Give up the current round; the word is revealed in the result
    pub fn forfeit(&mut self) -> Snapshot {
        if self.is_complete() {
            return self.rejected(InvalidAction::RoundOver);
        }
        self.finish(RoundStatus::Forfeited);
        self.snapshot()
    }

    fn finish(&mut self, status: RoundStatus) {
        self.status = status;
        self.message = match status {
            RoundStatus::Won => "CONGRATULATIONS, YOU WIN!!!".to_string(),
            RoundStatus::Lost => format!("Sorry, you are hung! The word is {}.", self.secret),
            RoundStatus::Forfeited => format!(
                "You lose, because you gave up! The word is {}.",
                self.secret
            ),
            RoundStatus::InProgress => return,
        };
        info!(%status, bad_guesses = self.bad_guesses, "round finished");
    }

    pub fn remaining_bad_guesses(&self) -> u8 {
        MAX_BAD_GUESSES.saturating_sub(self.bad_guesses)
    }

    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn bad_guesses(&self) -> u8 {
        self.bad_guesses
    }

    pub fn secret_word(&self) -> &SecretWord {
        &self.secret
    }

    pub fn guessed_letters(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn pattern(&self) -> Vec<Cell> {
        self.revealed
            .iter()
            .zip(self.secret.letters())
            .map(|(revealed, c)| if *revealed { Cell::Revealed(c) } else { Cell::Blank })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pattern: self.pattern(),
            message: self.message.clone(),
            status: self.status,
            bad_guesses: self.bad_guesses,
            remaining_bad_guesses: self.remaining_bad_guesses(),
            guessed: self.guessed.iter().copied().collect(),
            misses: self
                .guessed
                .iter()
                .copied()
                .filter(|c| !self.secret.contains(*c))
                .collect(),
            secret: self
                .is_complete()
                .then(|| self.secret.to_string()),
            rejected: None,
        }
    }

    fn rejected(&self, reason: InvalidAction) -> Snapshot {
        Snapshot {
            rejected: Some(reason),
            ..self.snapshot()
        }
    }
}
