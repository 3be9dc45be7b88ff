use crate::data::{Lexicon, Word};
use crate::letters::*;
use crate::results::{FeedbackLabel, FeedbackPattern, WordleError};
use log::trace;
use std::result::Result;

/// A letter along with its location in the word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LocatedLetter {
    pub letter: char,
    /// The zero-based location (i.e. index) for this letter in a word.
    pub location: u8,
}

impl LocatedLetter {
    pub fn new(letter: char, location: u8) -> LocatedLetter {
        LocatedLetter { letter, location }
    }
}

/// Defines letter restrictions that a word must adhere to, as implied by the feedback for one
/// guess.
///
/// * A green letter must be at its location.
/// * A yellow letter must not be at its location, and must appear at least as many times as it
///   was marked green or yellow in the guess.
/// * A grey letter must not be at its location, and must not appear more times than it was marked
///   green or yellow in the guess. A letter that is only ever grey must not appear at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraints {
    /// The letter that must be at each location, if known.
    required: [Option<u8>; WORD_LENGTH],
    /// Bitmask per letter of the locations where it must not be.
    excluded_locations: [u8; NUM_LETTERS],
    min_counts: [u8; NUM_LETTERS],
    max_counts: [u8; NUM_LETTERS],
}

impl Constraints {
    /// Creates a `Constraints` object that every word satisfies.
    pub fn new() -> Constraints {
        Constraints {
            required: [None; WORD_LENGTH],
            excluded_locations: [0; NUM_LETTERS],
            min_counts: [0; NUM_LETTERS],
            max_counts: [WORD_LENGTH as u8; NUM_LETTERS],
        }
    }

    /// Returns the constraints implied by playing `guess` and receiving `pattern`.
    ///
    /// ```
    /// use wordle_entropy::details::Constraints;
    /// use wordle_entropy::{Word, WordleError};
    ///
    /// let guess: Word = "speed".parse()?;
    /// let constraints = Constraints::from_feedback(&guess, &"gy gy y gy y".parse()?);
    ///
    /// assert!(constraints.is_satisfied_by(&"abide".parse()?));
    /// assert!(!constraints.is_satisfied_by(&"eerie".parse()?));
    /// # Ok::<(), WordleError>(())
    /// ```
    pub fn from_feedback(guess: &Word, pattern: &FeedbackPattern) -> Constraints {
        let mut tagged = [(0, 0, FeedbackLabel::Grey); WORD_LENGTH];
        for (location, (letter, label)) in guess.letters().iter().zip(pattern.labels()).enumerate()
        {
            tagged[location] = (*letter, location, *label);
        }
        Constraints::from_tagged_letters(&tagged)
    }

    /// Returns the constraints implied by separate sets of green, yellow and grey letters, each
    /// tagged with the location they were reported at.
    pub fn from_located_letters(
        green: &[LocatedLetter],
        yellow: &[LocatedLetter],
        grey: &[LocatedLetter],
    ) -> Result<Constraints, WordleError> {
        let mut tagged = Vec::with_capacity(green.len() + yellow.len() + grey.len());
        for (letters, label) in [
            (green, FeedbackLabel::Green),
            (yellow, FeedbackLabel::Yellow),
            (grey, FeedbackLabel::Grey),
        ] {
            for located_letter in letters {
                let location = located_letter.location as usize;
                if location >= WORD_LENGTH {
                    return Err(WordleError::InvalidFeedback(format!(
                        "location {} is outside a {}-letter word",
                        location, WORD_LENGTH
                    )));
                }
                tagged.push((encode_letter(located_letter.letter)?, location, label));
            }
        }
        Ok(Constraints::from_tagged_letters(&tagged))
    }

    fn from_tagged_letters(tagged: &[(u8, usize, FeedbackLabel)]) -> Constraints {
        let mut constraints = Constraints::new();
        // Occurrences of each letter confirmed by a green or yellow label.
        for (letter, _, label) in tagged {
            if *label != FeedbackLabel::Grey {
                constraints.min_counts[*letter as usize] += 1;
            }
        }
        for (letter, location, label) in tagged {
            let letter_index = *letter as usize;
            match label {
                FeedbackLabel::Green => constraints.required[*location] = Some(*letter),
                FeedbackLabel::Yellow => {
                    constraints.excluded_locations[letter_index] |= 1 << location;
                }
                FeedbackLabel::Grey => {
                    constraints.excluded_locations[letter_index] |= 1 << location;
                    constraints.max_counts[letter_index] = constraints.min_counts[letter_index];
                }
            }
        }
        constraints
    }

    /// Returns `true` iff the given word satisfies these constraints.
    pub fn is_satisfied_by(&self, word: &Word) -> bool {
        for (location, letter) in word.letters().iter().enumerate() {
            if let Some(required) = self.required[location] {
                if required != *letter {
                    return false;
                }
            }
            if self.excluded_locations[*letter as usize] & (1 << location) != 0 {
                return false;
            }
        }
        word.letter_counts()
            .iter()
            .zip(self.min_counts.iter().zip(self.max_counts.iter()))
            .all(|(count, (min, max))| count >= min && count <= max)
    }

    /// The minimum number of times the given letter must appear.
    pub fn min_count(&self, letter: char) -> Result<u8, WordleError> {
        Ok(self.min_counts[encode_letter(letter)? as usize])
    }

    /// The maximum number of times the given letter may appear.
    pub fn max_count(&self, letter: char) -> Result<u8, WordleError> {
        Ok(self.max_counts[encode_letter(letter)? as usize])
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Constraints::new()
    }
}

/// Narrows the lexicon to the words consistent with receiving `pattern` for `guess`.
///
/// Returns [`WordleError::EmptyLexicon`] if no word is consistent, which usually means the
/// feedback was entered incorrectly.
pub fn narrow(
    lexicon: &Lexicon,
    guess: &Word,
    pattern: &FeedbackPattern,
) -> Result<Lexicon, WordleError> {
    let narrowed = lexicon.filter(&Constraints::from_feedback(guess, pattern));
    trace!(
        "{} [{}] narrowed {} words to {}",
        guess,
        pattern,
        lexicon.len(),
        narrowed.len()
    );
    if narrowed.is_empty() {
        return Err(WordleError::EmptyLexicon);
    }
    Ok(narrowed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(word: &str) -> Word {
        word.parse().unwrap()
    }

    fn pattern(symbols: &str) -> FeedbackPattern {
        symbols.parse().unwrap()
    }

    #[test]
    fn no_constraints_accepts_everything() {
        let constraints = Constraints::new();

        assert!(constraints.is_satisfied_by(&word("abcde")));
        assert!(constraints.is_satisfied_by(&word("zzzzz")));
    }

    #[test]
    fn green_letters_must_be_here() {
        let constraints = Constraints::from_feedback(&word("crane"), &pattern("gn gn gy gy gy"));

        assert!(constraints.is_satisfied_by(&word("crust")));
        assert!(constraints.is_satisfied_by(&word("crypt")));

        assert!(!constraints.is_satisfied_by(&word("trust")));
        assert!(!constraints.is_satisfied_by(&word("cough")));
        // Contains an excluded letter.
        assert!(!constraints.is_satisfied_by(&word("crank")));
    }

    #[test]
    fn yellow_letters_must_be_elsewhere() {
        let constraints = Constraints::from_feedback(&word("speed"), &pattern("gy gy y gy y"));

        assert!(constraints.is_satisfied_by(&word("abide")));
        assert!(constraints.is_satisfied_by(&word("lodge")));

        // Too many e's.
        assert!(!constraints.is_satisfied_by(&word("eerie")));
        assert!(!constraints.is_satisfied_by(&word("ended")));
        // Contains an excluded letter.
        assert!(!constraints.is_satisfied_by(&word("dense")));
        // 'd' is in the yellow location.
        assert!(!constraints.is_satisfied_by(&word("oxbed")));
        // Missing 'd'.
        assert!(!constraints.is_satisfied_by(&word("olive")));
    }

    #[test]
    fn grey_repeat_caps_count_without_excluding_letter() -> Result<(), WordleError> {
        let constraints = Constraints::from_feedback(&word("geese"), &pattern("gy gn gy gy gn"));

        assert_eq!(constraints.min_count('e')?, 2);
        assert_eq!(constraints.max_count('e')?, 2);
        assert_eq!(constraints.max_count('g')?, 0);
        assert_eq!(constraints.max_count('z')?, WORD_LENGTH as u8);

        assert!(!constraints.is_satisfied_by(&word("hedge")));
        assert!(constraints.is_satisfied_by(&word("fence")));
        assert!(!constraints.is_satisfied_by(&word("ledge")));
        assert!(constraints.is_satisfied_by(&word("belle")));
        // Three e's.
        assert!(!constraints.is_satisfied_by(&word("eerie")));
        Ok(())
    }

    #[test]
    fn yellow_and_green_of_same_letter_require_both() {
        let constraints = Constraints::from_feedback(&word("eerie"), &pattern("y gy gy gy gn"));

        // Needs two e's, one at the end and none at the start.
        assert!(constraints.is_satisfied_by(&word("theme")));
        assert!(!constraints.is_satisfied_by(&word("stone")));
        assert!(!constraints.is_satisfied_by(&word("evade")));
    }

    #[test]
    fn from_located_letters_matches_from_feedback() -> Result<(), WordleError> {
        let from_sets = Constraints::from_located_letters(
            &[LocatedLetter::new('e', 4)],
            &[LocatedLetter::new('e', 0)],
            &[
                LocatedLetter::new('e', 1),
                LocatedLetter::new('r', 2),
                LocatedLetter::new('i', 3),
            ],
        )?;

        assert_eq!(
            from_sets,
            Constraints::from_feedback(&word("eerie"), &pattern("y gy gy gy gn"))
        );
        Ok(())
    }

    #[test]
    fn from_located_letters_rejects_bad_input() {
        assert_eq!(
            Constraints::from_located_letters(&[LocatedLetter::new('1', 0)], &[], &[]),
            Err(WordleError::InvalidLetter('1'))
        );
        assert!(matches!(
            Constraints::from_located_letters(&[], &[LocatedLetter::new('a', 5)], &[]),
            Err(WordleError::InvalidFeedback(_))
        ));
    }

    #[test]
    fn narrow_to_nothing_is_an_error() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator(["crane", "trace", "slate", "plane", "shale"])?;

        assert_eq!(
            narrow(&lexicon, &word("crane"), &pattern("gn gn gy gy gy")),
            Err(WordleError::EmptyLexicon)
        );
        Ok(())
    }
}
