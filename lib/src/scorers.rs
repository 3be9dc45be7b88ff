use crate::data::{Lexicon, Word};
use crate::partitions::PartitionStrategy;
use crate::results::WordleError;
use std::result::Result;

/// Gives words a score, where the maximum score indicates the best guess.
pub trait WordScorer {
    /// Updates the scorer with the narrowed list of possible words.
    fn update(&mut self, possible_words: &Lexicon) -> Result<(), WordleError>;
    /// Determines a score for the given word. The higher the score, the better the guess.
    fn score_word(&self, word: &Word) -> Result<f64, WordleError>;
}

/// Computes the Shannon entropy, in bits, of a distribution given by class sizes.
///
/// Each class is weighted by its share of the total size. Empty classes are ignored, and a single
/// class has an entropy of exactly zero.
///
/// ```
/// use wordle_entropy::scorers::entropy_of_sizes;
///
/// assert_eq!(entropy_of_sizes([1, 1]), 1.0);
/// assert_eq!(entropy_of_sizes([7]), 0.0);
/// assert_eq!(entropy_of_sizes([2, 1, 1]), 1.5);
/// ```
pub fn entropy_of_sizes(sizes: impl IntoIterator<Item = usize>) -> f64 {
    let sizes: Vec<usize> = sizes.into_iter().filter(|size| *size > 0).collect();
    let total = sizes.iter().sum::<usize>() as f64;
    sizes
        .into_iter()
        .map(|size| {
            let size = size as f64;
            (size / total) * (total / size).log2()
        })
        .sum()
}

/// Scores `guess` by the expected information, in bits, it reveals about which candidate is the
/// secret.
///
/// Returns [`WordleError::DegenerateScore`] if there are fewer than two candidates.
pub fn score_guess(
    guess: &Word,
    candidates: &[Word],
    strategy: PartitionStrategy,
) -> Result<f64, WordleError> {
    if candidates.len() < 2 {
        return Err(WordleError::DegenerateScore(candidates.len()));
    }
    Ok(entropy_of_sizes(strategy.class_sizes(guess, candidates)))
}

/// Scores words by the entropy of the outcome classes they split the possible words into.
///
/// The best possible score for `n` possible words is `log2(n)`, when every word gets its own class.
#[derive(Clone, Debug)]
pub struct EntropyScorer {
    possible_words: Lexicon,
    strategy: PartitionStrategy,
}

impl EntropyScorer {
    /// Constructs an `EntropyScorer` for the given starting words.
    ///
    /// ```
    /// use wordle_entropy::scorers::{EntropyScorer, WordScorer};
    /// use wordle_entropy::{Lexicon, PartitionStrategy};
    ///
    /// let lexicon = Lexicon::from_iterator(&["crane", "slate"]).unwrap();
    /// let scorer = EntropyScorer::new(lexicon.clone(), PartitionStrategy::Feedback);
    ///
    /// assert_eq!(scorer.score_word(&lexicon[0]), Ok(1.0));
    /// ```
    pub fn new(possible_words: Lexicon, strategy: PartitionStrategy) -> EntropyScorer {
        EntropyScorer {
            possible_words,
            strategy,
        }
    }

    pub fn possible_words(&self) -> &Lexicon {
        &self.possible_words
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    /// Returns a scorer for the same words that partitions them with the given strategy.
    pub fn with_strategy(self, strategy: PartitionStrategy) -> EntropyScorer {
        EntropyScorer { strategy, ..self }
    }
}

impl WordScorer for EntropyScorer {
    fn update(&mut self, possible_words: &Lexicon) -> Result<(), WordleError> {
        self.possible_words = possible_words.clone();
        Ok(())
    }

    fn score_word(&self, word: &Word) -> Result<f64, WordleError> {
        score_guess(word, &self.possible_words, self.strategy)
    }
}
