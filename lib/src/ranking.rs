use crate::data::{FrequencyTable, Lexicon, Word};
use crate::partitions::PartitionStrategy;
use crate::results::WordleError;
use crate::scorers::{EntropyScorer, WordScorer};
use log::debug;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::result::Result;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A guess along with its score.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedGuess {
    pub word: Word,
    /// Expected information in bits, unless the table was blended with word frequencies.
    pub score: f64,
}

/// Guesses ordered from best to worst.
///
/// Entries are sorted by descending score. Equal scores are ordered alphabetically, so building a
/// table twice from the same inputs always gives the same order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankingTable {
    entries: Vec<RankedGuess>,
}

impl RankingTable {
    /// Scores every word in `pool` against the `candidates`, using all available threads.
    ///
    /// Returns [`WordleError::DegenerateScore`] if there are fewer than two candidates.
    ///
    /// ```
    /// use wordle_entropy::{Lexicon, PartitionStrategy, RankingTable};
    ///
    /// let lexicon = Lexicon::from_iterator(&["hatch", "catch", "match", "chart"]).unwrap();
    /// let table = RankingTable::build(&lexicon, &lexicon, PartitionStrategy::Feedback).unwrap();
    ///
    /// assert_eq!(table.len(), 4);
    /// // Every guess splits these words 1/2/1, so the alphabetically first one wins.
    /// assert_eq!(table.best().unwrap().word.to_string(), "catch");
    /// assert_eq!(table.best().unwrap().score, 1.5);
    /// ```
    pub fn build(
        pool: &[Word],
        candidates: &[Word],
        strategy: PartitionStrategy,
    ) -> Result<RankingTable, WordleError> {
        RankingTable::build_with_progress(pool, candidates, strategy, || {})
    }

    /// Same as [`Self::build`], but calls `on_scored` each time a word has been scored.
    ///
    /// `on_scored` may be called from several threads at once.
    pub fn build_with_progress<F>(
        pool: &[Word],
        candidates: &[Word],
        strategy: PartitionStrategy,
        on_scored: F,
    ) -> Result<RankingTable, WordleError>
    where
        F: Fn() + Sync,
    {
        let scorer = entropy_scorer(candidates, strategy)?;
        RankingTable::build_with_scorer(pool, &scorer, on_scored)
    }

    /// Scores every word in `pool` with the given scorer, calling `on_scored` each time a word has
    /// been scored.
    pub fn build_with_scorer<S, F>(
        pool: &[Word],
        scorer: &S,
        on_scored: F,
    ) -> Result<RankingTable, WordleError>
    where
        S: WordScorer + Sync,
        F: Fn() + Sync,
    {
        RankingTable::score_all(pool, |word| {
            let score = scorer.score_word(word)?;
            on_scored();
            Ok(score)
        })
    }

    /// Same as [`Self::build_with_scorer`], but gives up with [`WordleError::DeadlineExceeded`]
    /// unless every word has finished scoring by `deadline`. Nothing scored before the deadline is
    /// kept.
    pub fn build_with_deadline<S>(
        pool: &[Word],
        scorer: &S,
        deadline: Instant,
    ) -> Result<RankingTable, WordleError>
    where
        S: WordScorer + Sync,
    {
        RankingTable::score_all(pool, |word| {
            if Instant::now() >= deadline {
                return Err(WordleError::DeadlineExceeded);
            }
            let score = scorer.score_word(word)?;
            if Instant::now() > deadline {
                return Err(WordleError::DeadlineExceeded);
            }
            Ok(score)
        })
    }

    fn score_all<F>(pool: &[Word], score_word: F) -> Result<RankingTable, WordleError>
    where
        F: Fn(&Word) -> Result<f64, WordleError> + Sync,
    {
        let start = Instant::now();
        let entries = pool
            .par_iter()
            .map(|word| -> Result<RankedGuess, WordleError> {
                Ok(RankedGuess {
                    word: *word,
                    score: score_word(word)?,
                })
            })
            .collect::<Result<Vec<RankedGuess>, WordleError>>()?;
        debug!(
            "scored {} guesses in {:.3}s",
            pool.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(RankingTable::from_entries(entries))
    }

    /// Builds a table from unordered entries.
    pub fn from_entries(mut entries: Vec<RankedGuess>) -> RankingTable {
        entries.sort_by(compare_entries);
        RankingTable { entries }
    }

    /// Returns a new table with only the best `n` guesses.
    pub fn top(&self, n: usize) -> RankingTable {
        RankingTable {
            entries: self.entries.iter().take(n).copied().collect(),
        }
    }

    pub fn best(&self) -> Option<&RankedGuess> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[RankedGuess] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedGuess> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a new table that mixes each score with how common the word is.
    ///
    /// Scores and frequencies are each rescaled to `[0, 1]` across the table, then combined as
    /// `(1 - weight) * score + weight * frequency`. `weight` is clamped to `[0, 1]`, so a weight
    /// of 0 keeps the original order.
    pub fn blend_with_frequency(&self, frequencies: &FrequencyTable, weight: f64) -> RankingTable {
        let weight = weight.clamp(0.0, 1.0);
        let scale_score = min_max_scaler(self.entries.iter().map(|entry| entry.score));
        let scale_frequency = min_max_scaler(
            self.entries
                .iter()
                .map(|entry| frequencies.weight(&entry.word)),
        );
        RankingTable::from_entries(
            self.entries
                .iter()
                .map(|entry| RankedGuess {
                    word: entry.word,
                    score: (1.0 - weight) * scale_score(entry.score)
                        + weight * scale_frequency(frequencies.weight(&entry.word)),
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a RankingTable {
    type Item = &'a RankedGuess;
    type IntoIter = std::slice::Iter<'a, RankedGuess>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Returns an entropy scorer for the candidates, or [`WordleError::DegenerateScore`] if there are
/// fewer than two of them.
fn entropy_scorer(
    candidates: &[Word],
    strategy: PartitionStrategy,
) -> Result<EntropyScorer, WordleError> {
    if candidates.len() < 2 {
        return Err(WordleError::DegenerateScore(candidates.len()));
    }
    Ok(EntropyScorer::new(
        Lexicon::from_words(candidates.iter().copied()),
        strategy,
    ))
}

fn compare_entries(a: &RankedGuess, b: &RankedGuess) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.word.cmp(&b.word))
}

/// Returns a function mapping values onto `[0, 1]` relative to the min and max of `values`.
/// If all values are equal, everything maps to 0.
fn min_max_scaler(values: impl Iterator<Item = f64>) -> impl Fn(f64) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    move |value| {
        if max > min {
            (value - min) / (max - min)
        } else {
            0.0
        }
    }
}

/// A precomputed ranking for a full, unconstrained lexicon.
///
/// Ranking the first guess is the most expensive step, and it is the same for every game played
/// with the same words, so this can be computed once and saved.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StartingTable {
    lexicon_size: usize,
    strategy: PartitionStrategy,
    table: RankingTable,
}

impl StartingTable {
    /// Ranks every word in the lexicon against the whole lexicon.
    pub fn compute(
        lexicon: &Lexicon,
        strategy: PartitionStrategy,
    ) -> Result<StartingTable, WordleError> {
        Ok(StartingTable {
            lexicon_size: lexicon.len(),
            strategy,
            table: RankingTable::build(lexicon, lexicon, strategy)?,
        })
    }

    /// Wraps an already computed table.
    pub fn from_table(
        lexicon: &Lexicon,
        strategy: PartitionStrategy,
        table: RankingTable,
    ) -> StartingTable {
        StartingTable {
            lexicon_size: lexicon.len(),
            strategy,
            table,
        }
    }

    /// Returns true iff this table could have been computed from the given lexicon with the given
    /// strategy: same number of words, and every ranked word is in the lexicon.
    pub fn matches(&self, lexicon: &Lexicon, strategy: PartitionStrategy) -> bool {
        if self.strategy != strategy
            || self.lexicon_size != lexicon.len()
            || self.table.len() != lexicon.len()
        {
            return false;
        }
        let words: HashSet<&Word> = lexicon.iter().collect();
        self.table.iter().all(|entry| words.contains(&entry.word))
    }

    pub fn table(&self) -> &RankingTable {
        &self.table
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    pub fn into_table(self) -> RankingTable {
        self.table
    }
}
