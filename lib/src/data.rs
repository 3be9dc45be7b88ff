use crate::letters::*;
use crate::restrictions::Constraints;
use crate::results::WordleError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A five-letter word, stored as letter indices.
///
/// Words order lexicographically, the same as their string form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word {
    letters: [u8; WORD_LENGTH],
}

impl Word {
    /// The letter index at each location.
    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.letters
    }

    /// The number of times each letter occurs in this word, indexed by letter index.
    pub fn letter_counts(&self) -> [u8; NUM_LETTERS] {
        letter_counts(&self.letters)
    }

    /// The letter at the given zero-based location.
    pub fn letter_at(&self, location: usize) -> char {
        decode_letter(self.letters[location])
    }
}

impl FromStr for Word {
    type Err = WordleError;

    fn from_str(word: &str) -> Result<Self, Self::Err> {
        Ok(Word {
            letters: encode_word(word)?,
        })
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters {
            write!(f, "{}", decode_letter(letter))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({})", self)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let word = String::deserialize(deserializer)?;
        word.parse().map_err(de::Error::custom)
    }
}

/// An ordered list of unique candidate words.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Lexicon {
    words: Vec<Word>,
}

impl Lexicon {
    /// Constructs a new `Lexicon` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each word is trimmed and converted to lower
    /// case, and empty lines are skipped. Repeated words are only kept the first time they appear.
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, WordleError> {
        let lines = word_reader
            .lines()
            .collect::<std::io::Result<Vec<String>>>()?;
        Lexicon::from_iterator(lines)
    }

    /// Constructs a new `Lexicon` using the words from the given iterator.
    ///
    /// Each word is trimmed and converted to lower case, and empty strings are skipped.
    /// Repeated words are only kept the first time they appear.
    ///
    /// ```
    /// use wordle_entropy::Lexicon;
    ///
    /// let lexicon = Lexicon::from_iterator(&["crane", "", "Slate ", "crane"]).unwrap();
    /// assert_eq!(lexicon.len(), 2);
    /// assert_eq!(lexicon[1].to_string(), "slate");
    /// ```
    pub fn from_iterator<S>(words: impl IntoIterator<Item = S>) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|word| {
                let word = word.as_ref().trim();
                if word.is_empty() {
                    return None;
                }
                Some(word.parse::<Word>())
            })
            .collect::<Result<Vec<Word>, WordleError>>()?;
        Ok(Lexicon::from_words(words))
    }

    /// Constructs a new `Lexicon` from already-encoded words, dropping repeats.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut seen: HashSet<Word> = HashSet::new();
        Lexicon {
            words: words.into_iter().filter(|word| seen.insert(*word)).collect(),
        }
    }

    /// Returns a new lexicon holding only the words that satisfy the constraints, in the same
    /// order. The result may be empty.
    pub fn filter(&self, constraints: &Constraints) -> Lexicon {
        Lexicon {
            words: self
                .words
                .iter()
                .filter(|word| constraints.is_satisfied_by(word))
                .copied()
                .collect(),
        }
    }

    /// Returns the number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true iff there are no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Deref for Lexicon {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl<'a> IntoIterator for &'a Lexicon {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// How common each word is. Words without an entry have weight zero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
    weight_per_word: HashMap<Word, f64>,
}

impl FrequencyTable {
    /// Constructs a table from `(word, weight)` pairs. Negative weights are clamped to zero.
    pub fn from_iterator<S>(entries: impl IntoIterator<Item = (S, f64)>) -> Result<Self, WordleError>
    where
        S: AsRef<str>,
    {
        let weight_per_word = entries
            .into_iter()
            .map(|(word, weight)| -> Result<(Word, f64), WordleError> {
                Ok((word.as_ref().trim().parse()?, weight.max(0.0)))
            })
            .collect::<Result<HashMap<Word, f64>, WordleError>>()?;
        Ok(FrequencyTable { weight_per_word })
    }

    /// Returns the weight of the given word, or zero if it is unknown.
    pub fn weight(&self, word: &Word) -> f64 {
        *self.weight_per_word.get(word).unwrap_or(&0.0)
    }

    /// Returns a copy of this table with only the words in the given lexicon.
    pub fn restricted_to(&self, lexicon: &Lexicon) -> FrequencyTable {
        FrequencyTable {
            weight_per_word: lexicon
                .iter()
                .filter_map(|word| {
                    self.weight_per_word
                        .get(word)
                        .map(|weight| (*word, *weight))
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.weight_per_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight_per_word.is_empty()
    }
}
