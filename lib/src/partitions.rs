use crate::data::Word;
use crate::restrictions::Constraints;
use crate::results::{get_feedback, FeedbackPattern, NUM_PATTERNS};
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How to split the candidate words into the outcome classes a guess could produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PartitionStrategy {
    /// Treat every candidate as the secret, and group candidates by the feedback the guess would
    /// receive. Every candidate lands in exactly one class.
    #[default]
    Feedback,
    /// Try all 243 label combinations, keep the candidates consistent with each, and merge
    /// combinations that keep exactly the same candidates.
    ///
    /// Some combinations can't actually occur for a guess with repeated letters, so a candidate
    /// may then land in more than one class. For guesses without repeated letters this agrees
    /// with [`PartitionStrategy::Feedback`].
    LabelEnumeration,
}

impl PartitionStrategy {
    /// Splits the candidates into the outcome classes for the given guess.
    pub fn partition(&self, guess: &Word, candidates: &[Word]) -> Partitions {
        match self {
            PartitionStrategy::Feedback => Partitions::by_feedback(guess, candidates),
            PartitionStrategy::LabelEnumeration => {
                Partitions::by_label_enumeration(guess, candidates)
            }
        }
    }

    /// Returns just the size of each non-empty class. Cheaper than [`Self::partition`].
    pub fn class_sizes(&self, guess: &Word, candidates: &[Word]) -> Vec<usize> {
        match self {
            PartitionStrategy::Feedback => {
                let mut num_per_pattern = [0usize; NUM_PATTERNS];
                for secret in candidates {
                    num_per_pattern[get_feedback(guess, secret).index() as usize] += 1;
                }
                num_per_pattern
                    .into_iter()
                    .filter(|count| *count > 0)
                    .collect()
            }
            PartitionStrategy::LabelEnumeration => {
                Partitions::by_label_enumeration(guess, candidates)
                    .sizes()
                    .collect()
            }
        }
    }
}

/// The candidate words grouped by the feedback pattern that would leave them possible.
///
/// Only non-empty classes are kept, ordered by pattern index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partitions {
    classes: Vec<(FeedbackPattern, Vec<Word>)>,
}

impl Partitions {
    /// Groups the candidates by `get_feedback(guess, candidate)`.
    pub fn by_feedback(guess: &Word, candidates: &[Word]) -> Partitions {
        let mut words_per_pattern: Vec<Vec<Word>> = vec![Vec::new(); NUM_PATTERNS];
        for secret in candidates {
            words_per_pattern[get_feedback(guess, secret).index() as usize].push(*secret);
        }
        Partitions {
            classes: FeedbackPattern::all()
                .zip(words_per_pattern)
                .filter(|(_, words)| !words.is_empty())
                .collect(),
        }
    }

    /// Filters the candidates once per label combination, skipping empty results and results
    /// already produced by an earlier combination.
    pub fn by_label_enumeration(guess: &Word, candidates: &[Word]) -> Partitions {
        let mut seen: HashSet<Vec<Word>> = HashSet::new();
        let mut classes = Vec::new();
        for pattern in FeedbackPattern::all() {
            let constraints = Constraints::from_feedback(guess, &pattern);
            let words: Vec<Word> = candidates
                .iter()
                .filter(|word| constraints.is_satisfied_by(word))
                .copied()
                .collect();
            if words.is_empty() || seen.contains(&words) {
                continue;
            }
            seen.insert(words.clone());
            classes.push((pattern, words));
        }
        Partitions { classes }
    }

    pub fn classes(&self) -> &[(FeedbackPattern, Vec<Word>)] {
        &self.classes
    }

    /// The words in the class for the given pattern, if it is non-empty.
    pub fn get(&self, pattern: &FeedbackPattern) -> Option<&[Word]> {
        self.classes
            .binary_search_by_key(pattern, |(class_pattern, _)| *class_pattern)
            .ok()
            .map(|index| self.classes[index].1.as_slice())
    }

    pub fn sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.classes.iter().map(|(_, words)| words.len())
    }

    /// The number of non-empty classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Lexicon;
    use crate::results::WordleError;

    #[test]
    fn by_feedback_groups_every_candidate_once() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator(["crane", "trace", "slate", "plane", "shale"])?;
        let guess: Word = "slate".parse()?;

        let partitions = Partitions::by_feedback(&guess, &lexicon);

        assert_eq!(partitions.sizes().sum::<usize>(), lexicon.len());
        assert_eq!(
            partitions.get(&"gn gn gn gn gn".parse()?),
            Some(&["slate".parse::<Word>()?][..])
        );
        // Every word gets a different pattern.
        assert_eq!(partitions.len(), 5);
        Ok(())
    }

    #[test]
    fn by_feedback_merges_indistinguishable_words() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator(["hatch", "catch", "match", "latch"])?;
        let guess: Word = "zzzzz".parse()?;

        let partitions = Partitions::by_feedback(&guess, &lexicon);

        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions.classes()[0].0, "gy gy gy gy gy".parse()?);
        assert_eq!(partitions.classes()[0].1.len(), 4);
        Ok(())
    }

    #[test]
    fn strategies_agree_without_repeated_letters() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator([
            "crane", "trace", "slate", "plane", "shale", "react", "caret", "bloat",
        ])?;
        let guess: Word = "trace".parse()?;

        assert_eq!(
            Partitions::by_label_enumeration(&guess, &lexicon),
            Partitions::by_feedback(&guess, &lexicon)
        );
        Ok(())
    }

    #[test]
    fn class_sizes_matches_partition() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator(["geese", "fence", "belle", "hedge", "theme"])?;
        let guess: Word = "eerie".parse()?;

        for strategy in [
            PartitionStrategy::Feedback,
            PartitionStrategy::LabelEnumeration,
        ] {
            assert_eq!(
                strategy.class_sizes(&guess, &lexicon),
                strategy.partition(&guess, &lexicon).sizes().collect::<Vec<_>>()
            );
        }
        Ok(())
    }

    fn class_words(partitions: &Partitions) -> Vec<Vec<String>> {
        let mut classes: Vec<Vec<String>> = partitions
            .classes()
            .iter()
            .map(|(_, words)| words.iter().map(|word| word.to_string()).collect())
            .collect();
        classes.sort();
        classes
    }

    #[test]
    fn label_enumeration_merges_identical_classes() -> Result<(), WordleError> {
        let lexicon = Lexicon::from_iterator(["abide", "lodge", "olive", "mound"])?;
        let guess: Word = "speed".parse()?;

        // Either "e" may be the yellow one, so some words fit two combinations.
        let num_matching_patterns = FeedbackPattern::all()
            .filter(|pattern| {
                !lexicon
                    .filter(&Constraints::from_feedback(&guess, pattern))
                    .is_empty()
            })
            .count();
        let partitions = Partitions::by_label_enumeration(&guess, &lexicon);

        assert_eq!(num_matching_patterns, 5);
        assert_eq!(partitions.len(), 3);
        assert_eq!(
            class_words(&partitions),
            vec![
                vec!["abide".to_string(), "lodge".to_string()],
                vec!["mound".to_string()],
                vec!["olive".to_string()],
            ]
        );
        assert_eq!(
            class_words(&partitions),
            class_words(&Partitions::by_feedback(&guess, &lexicon))
        );
        Ok(())
    }
}
