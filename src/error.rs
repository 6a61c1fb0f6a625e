//! Error types for word handling and game actions.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// Text that cannot be used as a secret word.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WordError {
    #[display("word is empty")]
    Empty,
    #[display("'{word}' contains '{found}', only letters A-Z are allowed")]
    NotAlphabetic { word: String, found: char },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum WordBankError {
    /// Every word has been drawn; the bank must be reset before drawing again.
    #[display("no more words")]
    Empty,
    /// The bank was given a source list with nothing in it.
    #[display("word source contains no words")]
    NoWords,
}

#[derive(Debug, Display, Error)]
pub enum WordSourceError {
    #[display("unable to read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("word list {origin} has no usable words")]
    NoUsableWords {
        #[error(not(source))]
        origin: String,
    },
    #[display("built-in word list {name} not found")]
    MissingBuiltin {
        #[error(not(source))]
        name: String,
    },
}

/// A config file that exists but could not be used.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    #[display("unable to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("invalid config {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Why a game action was ignored. The session is left untouched when one of
/// these is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InvalidAction {
    #[display("the round is already over")]
    RoundOver,
    #[display("{letter} was already guessed")]
    AlreadyGuessed {
        #[error(not(source))]
        letter: char,
    },
    #[display("'{found}' is not a letter")]
    NotALetter {
        #[error(not(source))]
        found: char,
    },
    #[display("finish or give up on this word first")]
    RoundInProgress,
}
