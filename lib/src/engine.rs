use crate::data::{Lexicon, Word};
use crate::partitions::PartitionStrategy;
use crate::ranking::{RankedGuess, RankingTable, StartingTable};
use crate::restrictions::narrow;
use crate::results::*;
use crate::scorers::{EntropyScorer, WordScorer};
use log::debug;
use std::collections::HashSet;
use std::result::Result;

/// The number of guesses allowed in a standard game.
pub const DEFAULT_MAX_TURNS: u32 = 6;

/// Guesses an unknown word.
pub trait Guesser {
    /// Updates this guesser with the feedback received for a guess.
    fn update(&mut self, guess: &Word, pattern: &FeedbackPattern) -> Result<(), WordleError>;

    /// Selects a new guess for the game, or `None` if no word could be the secret.
    fn select_next_guess(&self) -> Option<Word>;

    /// Provides read access to the remaining set of possible words.
    fn possible_words(&self) -> &Lexicon;
}

/// Indicates which set of words to guess from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessFrom {
    /// Only guess words that could still be the secret.
    #[default]
    PossibleWords,
    /// Guess any word that hasn't been guessed yet, even if it can't be the secret. Such words
    /// sometimes split the possible words better.
    AllUnguessedWords,
}

/// What a turn did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Every letter was green. Contains the number of turns taken.
    Solved { turns: u32 },
    /// Only one word is still possible.
    Determined(Word),
    /// More than one word is still possible.
    Narrowed { remaining: usize },
    /// The turn budget ran out without finding the word.
    OutOfTurns,
}

impl TurnOutcome {
    /// Returns true iff there is nothing left to guess: the word was found, it is the only one
    /// left, or the turns ran out.
    pub fn is_final(&self) -> bool {
        !matches!(self, TurnOutcome::Narrowed { .. })
    }
}

/// Tracks one game: the words that are still possible, the guesses made so far, and the turn
/// budget. Each turn replaces the possible words with the ones consistent with its feedback.
#[derive(Clone, Debug)]
pub struct Solver {
    all_words: Lexicon,
    /// Holds the words that are still possible.
    scorer: EntropyScorer,
    guessed: Vec<Word>,
    guess_from: GuessFrom,
    max_turns: u32,
    starting_table: Option<RankingTable>,
}

impl Solver {
    /// Constructs a new `Solver` where every word in the lexicon is possible.
    ///
    /// ```
    /// use wordle_entropy::{Lexicon, Solver, TurnOutcome, Word};
    ///
    /// let lexicon = Lexicon::from_iterator(&["crane", "trace", "slate", "plane", "shale"]).unwrap();
    /// let mut solver = Solver::new(lexicon);
    ///
    /// let guess: Word = "crane".parse().unwrap();
    /// let outcome = solver.play_turn(&guess, &"gy gy gn gy gn".parse().unwrap());
    ///
    /// assert_eq!(outcome, Ok(TurnOutcome::Narrowed { remaining: 2 }));
    /// ```
    pub fn new(lexicon: Lexicon) -> Solver {
        Solver {
            scorer: EntropyScorer::new(lexicon.clone(), PartitionStrategy::default()),
            all_words: lexicon,
            guessed: Vec::new(),
            guess_from: GuessFrom::default(),
            max_turns: DEFAULT_MAX_TURNS,
            starting_table: None,
        }
    }

    pub fn with_strategy(mut self, strategy: PartitionStrategy) -> Solver {
        self.scorer = self.scorer.with_strategy(strategy);
        self
    }

    pub fn with_guess_from(mut self, guess_from: GuessFrom) -> Solver {
        self.guess_from = guess_from;
        self
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Solver {
        self.max_turns = max_turns;
        self
    }

    /// Uses a precomputed ranking for the first guess.
    ///
    /// The table is ignored if it was not computed for this solver's lexicon and strategy, in
    /// which case the first ranking is computed on demand.
    pub fn with_starting_table(mut self, starting_table: StartingTable) -> Solver {
        if starting_table.matches(&self.all_words, self.strategy()) {
            self.starting_table = Some(starting_table.into_table());
        } else {
            debug!("ignoring a starting table computed for a different lexicon or strategy");
        }
        self
    }

    /// Returns true iff a matching starting table is in use.
    pub fn has_starting_table(&self) -> bool {
        self.starting_table.is_some()
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.scorer.strategy()
    }

    pub fn all_words(&self) -> &Lexicon {
        &self.all_words
    }

    pub fn guesses(&self) -> &[Word] {
        &self.guessed
    }

    pub fn turns_taken(&self) -> u32 {
        self.guessed.len() as u32
    }

    pub fn turns_remaining(&self) -> u32 {
        self.max_turns.saturating_sub(self.turns_taken())
    }

    /// Ranks the guesses to choose from against the words that are still possible.
    ///
    /// If only one word is possible, the table holds just that word, with a score of zero.
    /// Returns [`WordleError::EmptyLexicon`] if no word is possible.
    pub fn rankings(&self) -> Result<RankingTable, WordleError> {
        let possible_words = self.scorer.possible_words();
        match possible_words.len() {
            0 => Err(WordleError::EmptyLexicon),
            1 => Ok(RankingTable::from_entries(vec![RankedGuess {
                word: possible_words[0],
                score: 0.0,
            }])),
            _ => {
                if self.guessed.is_empty() {
                    if let Some(table) = &self.starting_table {
                        return Ok(table.clone());
                    }
                }
                RankingTable::build_with_scorer(&self.guess_pool(), &self.scorer, || {})
            }
        }
    }

    /// Returns the best `n` guesses, best first.
    pub fn select_top_n_guesses(&self, n: usize) -> Result<RankingTable, WordleError> {
        Ok(self.rankings()?.top(n))
    }

    /// Plays one turn: records the guess and narrows the possible words by its feedback.
    ///
    /// Returns [`WordleError::EmptyLexicon`] if no possible word is consistent with the feedback.
    /// The solver is left unchanged in that case, so the feedback can be corrected and retried.
    pub fn play_turn(
        &mut self,
        guess: &Word,
        pattern: &FeedbackPattern,
    ) -> Result<TurnOutcome, WordleError> {
        let turns = self.turns_taken() + 1;
        if pattern.is_all_green() {
            self.scorer.update(&Lexicon::from_words([*guess]))?;
            self.guessed.push(*guess);
            return Ok(TurnOutcome::Solved { turns });
        }
        if turns >= self.max_turns {
            self.guessed.push(*guess);
            return Ok(TurnOutcome::OutOfTurns);
        }
        self.update(guess, pattern)?;
        let possible_words = self.scorer.possible_words();
        Ok(match possible_words.len() {
            1 => TurnOutcome::Determined(possible_words[0]),
            remaining => TurnOutcome::Narrowed { remaining },
        })
    }

    fn guess_pool(&self) -> Vec<Word> {
        // With two or fewer options left, guessing one of them is never worse.
        let possible_words = self.scorer.possible_words();
        if self.guess_from == GuessFrom::PossibleWords || possible_words.len() <= 2 {
            return possible_words.to_vec();
        }
        let guessed: HashSet<&Word> = self.guessed.iter().collect();
        self.all_words
            .iter()
            .filter(|word| !guessed.contains(word))
            .copied()
            .collect()
    }
}

impl Guesser for Solver {
    fn update(&mut self, guess: &Word, pattern: &FeedbackPattern) -> Result<(), WordleError> {
        let possible_words = self.scorer.possible_words();
        let narrowed = narrow(possible_words, guess, pattern)?;
        debug!(
            "turn {}: {} [{}] left {} of {} words",
            self.turns_taken() + 1,
            guess,
            pattern,
            narrowed.len(),
            possible_words.len()
        );
        self.scorer.update(&narrowed)?;
        self.guessed.push(*guess);
        Ok(())
    }

    fn select_next_guess(&self) -> Option<Word> {
        self.rankings()
            .ok()
            .and_then(|table| table.best().map(|entry| entry.word))
    }

    fn possible_words(&self) -> &Lexicon {
        self.scorer.possible_words()
    }
}

/// Attempts to guess the given word within the maximum number of guesses, using the given
/// guesser. Feedback for each guess is computed with [`get_feedback`].
pub fn play_game_with_guesser<G: Guesser>(
    word_to_guess: &Word,
    max_num_guesses: u32,
    mut guesser: G,
) -> GameResult {
    if !guesser.possible_words().contains(word_to_guess) {
        return GameResult::UnknownWord;
    }
    let mut guesses: Vec<Word> = Vec::new();
    for _ in 1..=max_num_guesses {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            None => return GameResult::UnknownWord,
        };
        guesses.push(guess);
        let pattern = get_feedback(&guess, word_to_guess);
        if pattern.is_all_green() {
            return GameResult::Success(guesses);
        }
        if let Err(err) = guesser.update(&guess, &pattern) {
            debug!("guesser rejected the feedback for {}: {}", guess, err);
            return GameResult::GuesserError(err);
        }
    }
    GameResult::Failure(guesses)
}
