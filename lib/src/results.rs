use crate::data::Word;
use crate::letters::{letter_counts, WORD_LENGTH};
use std::fmt;
use std::io;
use std::result::Result;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of distinct [`FeedbackPattern`]s for a word (3 labels per letter).
pub const NUM_PATTERNS: usize = 243;

/// The feedback given for a single letter of a guess.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeedbackLabel {
    /// The letter is not in the word, or not any more times than it is already marked.
    Grey = 0,
    /// The letter is in the word, but not at this location.
    Yellow = 1,
    /// The letter is in the word at this location.
    Green = 2,
}

impl FeedbackLabel {
    /// The labels in the order of their numeric values.
    pub const ALL: [FeedbackLabel; 3] = [
        FeedbackLabel::Grey,
        FeedbackLabel::Yellow,
        FeedbackLabel::Green,
    ];

    /// The symbol used to enter this label: `"gy"`, `"y"` or `"gn"`.
    pub fn symbol(self) -> &'static str {
        match self {
            FeedbackLabel::Grey => "gy",
            FeedbackLabel::Yellow => "y",
            FeedbackLabel::Green => "gn",
        }
    }
}

impl FromStr for FeedbackLabel {
    type Err = WordleError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        match symbol {
            "gn" => Ok(FeedbackLabel::Green),
            "y" => Ok(FeedbackLabel::Yellow),
            "gy" => Ok(FeedbackLabel::Grey),
            other => Err(WordleError::InvalidFeedback(format!(
                "unrecognized label {:?}, expected one of \"gn\", \"y\" or \"gy\"",
                other
            ))),
        }
    }
}

/// The feedback for a whole guess, one label per letter.
///
/// Each pattern has a dense index in `[0, 243)`, so patterns can key fixed-size tables.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedbackPattern {
    labels: [FeedbackLabel; WORD_LENGTH],
}

impl FeedbackPattern {
    pub fn new(labels: [FeedbackLabel; WORD_LENGTH]) -> FeedbackPattern {
        FeedbackPattern { labels }
    }

    /// Parses one label symbol per letter.
    ///
    /// ```
    /// use wordle_entropy::{FeedbackLabel, FeedbackPattern, WordleError};
    ///
    /// let pattern = FeedbackPattern::from_labels(&["gn", "y", "gy", "gy", "y"])?;
    /// assert_eq!(pattern.labels()[0], FeedbackLabel::Green);
    ///
    /// assert!(FeedbackPattern::from_labels(&["gn", "y", "gy", "gy"]).is_err());
    /// assert!(FeedbackPattern::from_labels(&["green", "y", "gy", "gy", "y"]).is_err());
    /// # Ok::<(), WordleError>(())
    /// ```
    pub fn from_labels<S>(symbols: &[S]) -> Result<FeedbackPattern, WordleError>
    where
        S: AsRef<str>,
    {
        if symbols.len() != WORD_LENGTH {
            return Err(WordleError::InvalidFeedback(format!(
                "expected {} labels, got {}",
                WORD_LENGTH,
                symbols.len()
            )));
        }
        let mut labels = [FeedbackLabel::Grey; WORD_LENGTH];
        for (label, symbol) in labels.iter_mut().zip(symbols) {
            *label = symbol.as_ref().parse()?;
        }
        Ok(FeedbackPattern { labels })
    }

    /// Returns the pattern with the given dense index.
    ///
    /// Returns `None` if `index` is not less than [`NUM_PATTERNS`].
    pub fn from_index(index: u8) -> Option<FeedbackPattern> {
        if index as usize >= NUM_PATTERNS {
            return None;
        }
        let mut remaining = index;
        let mut labels = [FeedbackLabel::Grey; WORD_LENGTH];
        for label in labels.iter_mut().rev() {
            *label = FeedbackLabel::ALL[(remaining % 3) as usize];
            remaining /= 3;
        }
        Some(FeedbackPattern { labels })
    }

    /// The dense index of this pattern. The first letter is the most significant digit.
    pub fn index(&self) -> u8 {
        self.labels
            .iter()
            .fold(0, |acc, label| acc * 3 + *label as u8)
    }

    /// Iterates over every possible pattern, in index order.
    pub fn all() -> impl Iterator<Item = FeedbackPattern> {
        (0..NUM_PATTERNS as u8).filter_map(FeedbackPattern::from_index)
    }

    pub fn labels(&self) -> &[FeedbackLabel; WORD_LENGTH] {
        &self.labels
    }

    /// Returns true iff every letter is [`FeedbackLabel::Green`].
    pub fn is_all_green(&self) -> bool {
        self.labels
            .iter()
            .all(|label| *label == FeedbackLabel::Green)
    }
}

/// Parses whitespace- or comma-separated label symbols, e.g. `"gn y gy gy y"`.
impl FromStr for FeedbackPattern {
    type Err = WordleError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<&str> = input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|symbol| !symbol.is_empty())
            .collect();
        FeedbackPattern::from_labels(&symbols)
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, label) in self.labels.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            f.write_str(label.symbol())?;
        }
        Ok(())
    }
}

/// Indicates that an error occurred while narrowing or scoring words.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum WordleError {
    /// A character outside the supported alphabet.
    #[error("unsupported letter {0:?}, only a-z are allowed")]
    InvalidLetter(char),
    /// A word with the wrong number of letters. Contains the offending length.
    #[error("words must have exactly 5 letters, got {0}")]
    WordLength(usize),
    /// Feedback with the wrong number of labels, or an unrecognized label.
    #[error("invalid feedback: {0}")]
    InvalidFeedback(String),
    /// No candidate word is consistent with the given feedback.
    #[error("no words are consistent with the given feedback")]
    EmptyLexicon,
    /// Entropy is only meaningful for at least two candidates. Contains the number of candidates.
    #[error("cannot score guesses against {0} candidate(s)")]
    DegenerateScore(usize),
    /// The ranking pass did not finish before its deadline.
    #[error("ranking did not finish before the deadline")]
    DeadlineExceeded,
    /// Reading words failed.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<io::Error> for WordleError {
    fn from(e: io::Error) -> Self {
        WordleError::IoError(e.to_string())
    }
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, Eq, PartialEq)]
pub enum GameResult {
    /// Indicates that the guesser won the game, and provides the guesses that were given.
    Success(Vec<Word>),
    /// Indicates that the guesser failed to guess the word, and provides the guesses that were given.
    Failure(Vec<Word>),
    /// Indicates that the given word was not in the lexicon.
    UnknownWord,
    /// Indicates that the guesser could not take in the feedback for one of its guesses.
    GuesserError(WordleError),
}

/// Determines the feedback the game gives for `guess` when the secret word is `secret`.
///
/// Exact matches are marked green first. The remaining letters are then marked yellow from left
/// to right while unmatched copies of that letter remain in the secret, and grey otherwise.
///
/// ```
/// use wordle_entropy::{get_feedback, FeedbackPattern, Word, WordleError};
///
/// let guess: Word = "sassy".parse()?;
/// let secret: Word = "mesas".parse()?;
/// assert_eq!(get_feedback(&guess, &secret), "y y gn gy gy".parse::<FeedbackPattern>()?);
/// # Ok::<(), WordleError>(())
/// ```
pub fn get_feedback(guess: &Word, secret: &Word) -> FeedbackPattern {
    let mut labels = [FeedbackLabel::Grey; WORD_LENGTH];
    let mut unmatched = letter_counts(secret.letters());
    for (index, (guess_letter, secret_letter)) in
        guess.letters().iter().zip(secret.letters()).enumerate()
    {
        if guess_letter == secret_letter {
            labels[index] = FeedbackLabel::Green;
            unmatched[*guess_letter as usize] -= 1;
        }
    }
    for (index, guess_letter) in guess.letters().iter().enumerate() {
        if labels[index] == FeedbackLabel::Green {
            continue;
        }
        let remaining = &mut unmatched[*guess_letter as usize];
        if *remaining > 0 {
            labels[index] = FeedbackLabel::Yellow;
            *remaining -= 1;
        }
    }
    FeedbackPattern { labels }
}
