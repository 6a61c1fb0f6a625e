use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::app::App;
use crate::game::{Cell, RoundStatus, Snapshot, MAX_BAD_GUESSES};

const FIGURE_WIDTH: u16 = 14;
const FIGURE_HEIGHT: u16 = 9;

/// ASCII gallows for a number of bad guesses.
///
/// Parts appear in order: rope, head, body, right arm, left arm, right leg,
/// left leg.
pub fn figure(stage: u8) -> Vec<String> {
    let part = |min: u8, c: char| if stage >= min { c } else { ' ' };

    vec![
        "  +-----+".to_string(),
        format!("  |     {}", part(1, '|')),
        format!("  |     {}", part(2, 'O')),
        format!("  |    {}{}{}", part(4, '/'), part(3, '|'), part(5, '\\')),
        format!("  |     {}", part(3, '|')),
        format!("  |    {} {}", part(7, '/'), part(6, '\\')),
        "  |".to_string(),
        "=====".to_string(),
    ]
    .into_iter()
    .map(|line| line.trim_end().to_string())
    .collect()
}

impl<R: Rng> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.snapshot();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),             // header
                Constraint::Min(FIGURE_HEIGHT),    // figure + word
                Constraint::Length(1),             // alphabet
                Constraint::Length(1),             // padding
                Constraint::Length(1),             // legend
            ])
            .split(area);

        let header = Paragraph::new(Span::styled(
            format!(
                "Round {}   Words left: {}",
                self.rounds_played(),
                self.words_left()
            ),
            bold_style.fg(Color::Cyan),
        ))
        .block(Block::default().borders(Borders::ALL).title("Gallows"))
        .alignment(Alignment::Center);
        header.render(chunks[0], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FIGURE_WIDTH), Constraint::Min(1)])
            .split(chunks[1]);

        let figure_color = match snapshot.status {
            RoundStatus::Lost | RoundStatus::Forfeited => Color::Red,
            RoundStatus::Won => Color::Green,
            RoundStatus::InProgress => Color::Reset,
        };
        let figure_lines: Vec<Line> = figure(snapshot.bad_guesses)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(figure_color))))
            .collect();
        Paragraph::new(figure_lines).render(body[0], buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(pattern_spans(snapshot, bold_style)),
            Line::from(""),
            Line::from(Span::styled(snapshot.message.clone(), bold_style)),
            Line::from(Span::styled(
                format!("Bad guesses remaining: {}", snapshot.remaining_bad_guesses),
                remaining_style(snapshot.remaining_bad_guesses),
            )),
        ];
        if let Some(reason) = snapshot.rejected {
            lines.push(Line::from(Span::styled(
                format!("({reason})"),
                italic_style.fg(Color::Yellow),
            )));
        }
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(body[1], buf);

        Paragraph::new(Line::from(alphabet_spans(snapshot, bold_style, dim_style)))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let legend = if self.is_exhausted() {
            "(esc)ape"
        } else if snapshot.is_complete() {
            "Press Enter for the next word / (esc)ape"
        } else {
            "(a-z) guess / (!) give up / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[4], buf);
    }
}

fn pattern_spans(snapshot: &Snapshot, bold_style: Style) -> Vec<Span<'static>> {
    // once the round is over show the whole word, missing letters in red
    let secret: Vec<char> = snapshot
        .secret
        .as_deref()
        .map(|s| s.chars().collect())
        .unwrap_or_default();

    snapshot
        .pattern
        .iter()
        .enumerate()
        .flat_map(|(idx, cell)| {
            let span = match (cell, secret.get(idx)) {
                (Cell::Revealed(c), _) => {
                    Span::styled(c.to_string(), bold_style.fg(Color::Green))
                }
                (Cell::Blank, Some(c)) => Span::styled(c.to_string(), bold_style.fg(Color::Red)),
                (Cell::Blank, None) => Span::styled("_", bold_style),
            };
            [span, Span::raw(" ")]
        })
        .collect()
}

fn alphabet_spans(snapshot: &Snapshot, bold_style: Style, dim_style: Style) -> Vec<Span<'static>> {
    ('A'..='Z')
        .flat_map(|c| {
            let style = if snapshot.misses.contains(&c) {
                dim_style.fg(Color::Red).add_modifier(Modifier::CROSSED_OUT)
            } else if snapshot.guessed.contains(&c) {
                bold_style.fg(Color::Green)
            } else {
                Style::default()
            };
            [Span::styled(c.to_string(), style), Span::raw(" ")]
        })
        .collect()
}

fn remaining_style(remaining: u8) -> Style {
    let color = if remaining == MAX_BAD_GUESSES {
        Color::Green
    } else if remaining > 2 {
        Color::Yellow
    } else {
        Color::Red
    };
    Style::default().fg(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::word_bank::WordBank;
    use crate::words::SecretWord;

    fn create_test_app(word: &str, refill: bool) -> App {
        let words = vec![SecretWord::new(word).unwrap()];
        App::new(WordBank::with_seed(words, 1).unwrap(), refill).unwrap()
    }

    fn render(app: &App) -> Vec<String> {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);

        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_figure_stages() {
        assert_eq!(figure(0)[1], "  |");
        assert_eq!(figure(1)[1], "  |     |");
        assert_eq!(figure(2)[2], "  |     O");
        assert_eq!(figure(3)[3], "  |     |");
        assert_eq!(figure(4)[3], "  |    /|");
        assert_eq!(figure(5)[3], "  |    /|\\");
        assert_eq!(figure(6)[5], "  |      \\");
        assert_eq!(figure(7)[5], "  |    / \\");
        assert!(figure(7).iter().all(|l| l.len() <= FIGURE_WIDTH as usize));
    }

    #[test]
    fn test_render_new_round() {
        let app = create_test_app("cat", true);
        let screen = render(&app);

        assert!(screen_contains(&screen, "Round 1"));
        assert!(screen_contains(&screen, "_ _ _"));
        assert!(screen_contains(&screen, "The word has 3 letters."));
        assert!(screen_contains(&screen, "Bad guesses remaining: 7"));
        assert!(screen_contains(&screen, "A B C D E"));
        assert!(screen_contains(&screen, "(!) give up"));
    }

    #[test]
    fn test_render_partial_pattern() {
        let mut app = create_test_app("cat", true);
        app.handle(Action::GuessLetter('a'));
        app.handle(Action::GuessLetter('z'));
        let screen = render(&app);

        assert!(screen_contains(&screen, "_ A _"));
        assert!(screen_contains(&screen, "Bad guesses remaining: 6"));
        assert!(screen_contains(&screen, "  |     |"));
    }

    #[test]
    fn test_render_forfeit_shows_word() {
        let mut app = create_test_app("sun", true);
        app.handle(Action::Forfeit);
        let screen = render(&app);

        assert!(screen_contains(&screen, "S U N"));
        assert!(screen_contains(&screen, "The word is SUN."));
        assert!(screen_contains(&screen, "Press Enter for the next word"));
    }

    #[test]
    fn test_render_rejected_guess() {
        let mut app = create_test_app("cat", true);
        app.handle(Action::GuessLetter('c'));
        app.handle(Action::GuessLetter('c'));
        let screen = render(&app);

        assert!(screen_contains(&screen, "(C was already guessed)"));
        assert!(screen_contains(&screen, "Yes, C is in the word."));
    }

    #[test]
    fn test_render_next_round_during_play() {
        let mut app = create_test_app("cat", true);
        app.handle(Action::NextRound);
        let screen = render(&app);

        assert!(screen_contains(&screen, "(finish or give up on this word first)"));
        assert!(screen_contains(&screen, "(a-z) guess"));
    }

    #[test]
    fn test_render_exhausted() {
        let mut app = create_test_app("sun", false);
        app.handle(Action::Forfeit);
        app.handle(Action::NextRound);
        let screen = render(&app);

        assert!(screen_contains(&screen, "No more words."));
        assert!(!screen_contains(&screen, "Press Enter"));
    }

    #[test]
    fn test_render_small_area_does_not_panic() {
        let app = create_test_app("cat", true);
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
    }
}
