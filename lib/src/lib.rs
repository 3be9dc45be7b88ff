#![cfg_attr(feature = "unstable", feature(test))]

//! Narrows the candidates for a five-letter word game from letter feedback, and ranks guesses by
//! the expected information (entropy, in bits) their feedback would reveal.
//!
//! ```
//! use wordle_entropy::{Lexicon, Solver, TurnOutcome};
//!
//! let lexicon = Lexicon::from_iterator(&["crane", "trace", "slate", "plane", "shale"]).unwrap();
//! let mut solver = Solver::new(lexicon);
//!
//! let best = solver.select_top_n_guesses(5).unwrap();
//! let guess = best.best().unwrap().word;
//! let outcome = solver.play_turn(&guess, &"gn gn gn gn gn".parse().unwrap());
//!
//! assert_eq!(outcome, Ok(TurnOutcome::Solved { turns: 1 }));
//! ```

mod data;
mod engine;
mod letters;
mod partitions;
mod ranking;
mod restrictions;
mod results;

/// Word scoring functions.
pub mod scorers;

pub use data::FrequencyTable;
pub use data::Lexicon;
pub use data::Word;
pub use engine::*;
pub use partitions::PartitionStrategy;
pub use ranking::*;
pub use results::*;

/// Lower-level building blocks: the letter codec, constraints and partitions.
pub mod details {
    pub use crate::letters::*;
    pub use crate::partitions::*;
    pub use crate::restrictions::*;
}
