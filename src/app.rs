use rand::{rngs::StdRng, Rng};
use tracing::{info, warn};

use crate::error::{InvalidAction, WordBankError};
use crate::game::{GameSession, Snapshot};
use crate::word_bank::WordBank;

/// Everything the player can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GuessLetter(char),
    Forfeit,
    NextRound,
    Quit,
}

/// What the host loop should do after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Owns the word bank and the current round, and keeps the latest snapshot
/// for the renderer.
#[derive(Debug)]
pub struct App<R: Rng = StdRng> {
    bank: WordBank<R>,
    session: GameSession,
    snapshot: Snapshot,
    refill_when_empty: bool,
    rounds_played: u32,
    exhausted: bool,
}

impl<R: Rng> App<R> {
    /// Draws the first word immediately
    pub fn new(mut bank: WordBank<R>, refill_when_empty: bool) -> Result<Self, WordBankError> {
        let word = bank.draw()?;
        let session = GameSession::new(word);
        let snapshot = session.snapshot();

        Ok(Self {
            bank,
            session,
            snapshot,
            refill_when_empty,
            rounds_played: 1,
            exhausted: false,
        })
    }

    pub fn handle(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => {
                info!(rounds = self.rounds_played, "quitting");
                return Control::Quit;
            }
            _ if self.exhausted => {}
            Action::GuessLetter(c) => {
                self.snapshot = self.session.guess_letter(c);
            }
            Action::Forfeit => {
                self.snapshot = self.session.forfeit();
            }
            Action::NextRound => self.next_round(),
        }

        Control::Continue
    }

    fn next_round(&mut self) {
        if !self.session.is_complete() {
            warn!("next round requested while a round is in progress");
            self.snapshot = Snapshot {
                rejected: Some(InvalidAction::RoundInProgress),
                ..self.session.snapshot()
            };
            return;
        }

        let word = match self.bank.draw() {
            Ok(word) => word,
            Err(WordBankError::Empty) if self.refill_when_empty => {
                self.bank.refill();
                match self.bank.draw() {
                    Ok(word) => word,
                    Err(err) => return self.exhaust(err),
                }
            }
            Err(err) => return self.exhaust(err),
        };

        self.snapshot = self.session.start_round(word);
        self.rounds_played += 1;
    }

    fn exhaust(&mut self, err: WordBankError) {
        warn!(%err, "cannot start another round");
        self.exhausted = true;
        self.snapshot.message = "No more words. Press Esc to quit.".to_string();
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn words_left(&self) -> usize {
        self.bank.count()
    }

    /// True once the bank ran dry and refilling is disabled
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::RoundStatus;
    use crate::words::SecretWord;

    fn app(list: &[&str], refill: bool) -> App {
        let words = list.iter().map(|w| SecretWord::new(w).unwrap()).collect();
        App::new(WordBank::with_seed(words, 11).unwrap(), refill).unwrap()
    }

    fn solve(app: &mut App) {
        let secret = app.session().secret_word().clone();
        for c in secret.letters() {
            app.handle(Action::GuessLetter(c));
        }
    }

    #[test]
    fn test_first_round_starts_on_creation() {
        let app = app(&["cat", "dog"], true);
        assert_eq!(app.snapshot().status, RoundStatus::InProgress);
        assert_eq!(app.rounds_played(), 1);
        assert_eq!(app.words_left(), 1);
    }

    #[test]
    fn test_guess_updates_snapshot() {
        let mut app = app(&["cat"], true);
        assert_eq!(app.handle(Action::GuessLetter('a')), Control::Continue);
        assert_eq!(app.snapshot().pattern_text(), "_ A _");
    }

    #[test]
    fn test_next_round_ignored_while_playing() {
        let mut app = app(&["cat", "dog"], true);
        let word = app.session().secret_word().clone();

        app.handle(Action::GuessLetter('z'));
        let message = app.snapshot().message.clone();

        app.handle(Action::NextRound);

        assert_eq!(app.session().secret_word(), &word);
        assert_eq!(app.rounds_played(), 1);
        assert_eq!(app.snapshot().rejected, Some(InvalidAction::RoundInProgress));
        assert_eq!(app.snapshot().message, message);
        assert_eq!(app.snapshot().bad_guesses, 1);
    }

    #[test]
    fn test_forfeit_then_next_round() {
        let mut app = app(&["cat", "dog"], true);
        let first = app.session().secret_word().clone();

        app.handle(Action::Forfeit);
        assert_eq!(app.snapshot().status, RoundStatus::Forfeited);

        app.handle(Action::NextRound);
        assert_eq!(app.snapshot().status, RoundStatus::InProgress);
        assert_ne!(app.session().secret_word(), &first);
        assert_eq!(app.rounds_played(), 2);
    }

    #[test]
    fn test_refill_when_bank_runs_dry() {
        let mut app = app(&["cat"], true);
        solve(&mut app);
        assert_eq!(app.snapshot().status, RoundStatus::Won);
        assert_eq!(app.words_left(), 0);

        app.handle(Action::NextRound);

        assert_eq!(app.snapshot().status, RoundStatus::InProgress);
        assert!(!app.is_exhausted());
        assert_eq!(app.session().secret_word().as_str(), "CAT");
    }

    #[test]
    fn test_exhausted_without_refill() {
        let mut app = app(&["cat"], false);
        app.handle(Action::Forfeit);

        app.handle(Action::NextRound);

        assert!(app.is_exhausted());
        assert_eq!(app.snapshot().status, RoundStatus::Forfeited);
        assert_eq!(app.snapshot().message, "No more words. Press Esc to quit.");

        // nothing else moves the game along
        app.handle(Action::NextRound);
        app.handle(Action::GuessLetter('C'));
        assert_eq!(app.rounds_played(), 1);
        assert_eq!(app.snapshot().message, "No more words. Press Esc to quit.");
        assert_eq!(app.handle(Action::Quit), Control::Quit);
    }

    #[test]
    fn test_quit() {
        let mut app = app(&["cat"], true);
        assert_eq!(app.handle(Action::Quit), Control::Quit);
    }
}
