// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod ui;
pub mod word_bank;
pub mod words;

pub use app::{Action, App, Control};
pub use error::{ConfigError, InvalidAction, WordBankError, WordError, WordSourceError};
pub use game::{Cell, GameSession, RoundStatus, Snapshot, MAX_BAD_GUESSES};
pub use word_bank::WordBank;
pub use words::SecretWord;
