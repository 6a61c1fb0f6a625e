use include_dir::{include_dir, Dir};
use itertools::Itertools;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{WordError, WordSourceError};

static WORDLIST_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/wordlists");

/// Name of the list shipped inside the binary
pub const BUILTIN_LIST: &str = "english";

/// A validated secret word: non-empty, letters A-Z only, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SecretWord(String);

impl SecretWord {
    pub fn new(text: &str) -> Result<Self, WordError> {
        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if let Some(found) = text.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(WordError::NotAlphabetic {
                word: text.to_string(),
                found,
            });
        }

        Ok(Self(text.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters (the word is ASCII, so bytes and chars agree)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for SecretWord {
    type Error = WordError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text)
    }
}

/// Parse a line-delimited word list.
///
/// Blank lines and `#` comments are ignored, every other line is trimmed and
/// validated. Invalid lines are skipped with a warning and duplicates are
/// dropped, keeping the first occurrence. `origin` only labels log lines and
/// errors.
pub fn parse_word_list(text: &str, origin: &str) -> Result<Vec<SecretWord>, WordSourceError> {
    let words: Vec<SecretWord> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|(line_no, line)| match SecretWord::new(line) {
            Ok(word) => Some(word),
            Err(err) => {
                warn!(origin, line_no, %err, "skipping word list entry");
                None
            }
        })
        .unique()
        .collect();

    if words.is_empty() {
        return Err(WordSourceError::NoUsableWords {
            origin: origin.to_string(),
        });
    }

    debug!(origin, count = words.len(), "parsed word list");
    Ok(words)
}

/// Load the list embedded in the binary
pub fn builtin_words(name: &str) -> Result<Vec<SecretWord>, WordSourceError> {
    let file_name = format!("{name}.txt");
    let text = WORDLIST_DIR
        .get_file(&file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| WordSourceError::MissingBuiltin {
            name: name.to_string(),
        })?;

    parse_word_list(text, &file_name)
}

/// Load a user supplied list from disk
pub fn load_word_file<P: AsRef<Path>>(path: P) -> Result<Vec<SecretWord>, WordSourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| WordSourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_word_list(&text, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_secret_word_uppercases() {
        let word = SecretWord::new("Rust").unwrap();
        assert_eq!(word.as_str(), "RUST");
        assert_eq!(word.len(), 4);
        assert!(word.contains('U'));
        assert!(!word.contains('u'));
    }

    #[test]
    fn test_secret_word_rejects_empty() {
        assert_matches!(SecretWord::new(""), Err(WordError::Empty));
    }

    #[test]
    fn test_secret_word_rejects_non_letters() {
        assert_matches!(
            SecretWord::new("ice cream"),
            Err(WordError::NotAlphabetic { found: ' ', .. })
        );
        assert_matches!(
            SecretWord::new("café"),
            Err(WordError::NotAlphabetic { found: 'é', .. })
        );
    }

    #[test]
    fn test_parse_skips_comments_blanks_and_bad_lines() {
        let text = "# animals\n\ncat\n  dog  \nsea-lion\nCat\nemu\n";
        let words = parse_word_list(text, "test").unwrap();
        let words: Vec<&str> = words.iter().map(|w| w.as_str()).collect();

        assert_eq!(words, vec!["CAT", "DOG", "EMU"]);
    }

    #[test]
    fn test_parse_with_no_usable_words() {
        let result = parse_word_list("# nothing\n\n42\n", "empty");
        assert_matches!(result, Err(WordSourceError::NoUsableWords { origin }) if origin == "empty");
    }

    #[test]
    fn test_builtin_list_is_valid() {
        let words = builtin_words(BUILTIN_LIST).unwrap();
        assert!(words.len() > 100);
        assert!(words.iter().all(|w| w.letters().all(|c| c.is_ascii_uppercase())));
    }

    #[test]
    fn test_builtin_list_missing() {
        assert_matches!(
            builtin_words("klingon"),
            Err(WordSourceError::MissingBuiltin { name }) if name == "klingon"
        );
    }

    #[test]
    fn test_load_word_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple\nbanana\ncherry").unwrap();

        let words = load_word_file(file.path()).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].as_str(), "BANANA");
    }

    #[test]
    fn test_load_missing_word_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        assert_matches!(load_word_file(&path), Err(WordSourceError::Io { .. }));
    }
}
