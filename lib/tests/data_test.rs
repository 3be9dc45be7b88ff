#[macro_use]
extern crate assert_matches;

use wordle_entropy::*;

use std::io::Cursor;
use std::result::Result;

macro_rules! assert_words_eq {
    ($words:expr, $strs:expr) => {
        assert_eq!(
            $words
                .iter()
                .map(|word| word.to_string())
                .collect::<Vec<String>>(),
            $strs
                .iter()
                .map(|thing| thing.to_string())
                .collect::<Vec<String>>()
        );
    };
}

#[test]
fn lexicon_from_reader_succeeds() -> Result<(), WordleError> {
    let cursor = Cursor::new(String::from("\n\nworda\n wordb\n"));

    let lexicon = Lexicon::from_reader(cursor)?;

    assert_eq!(lexicon.len(), 2);
    assert_words_eq!(lexicon, ["worda", "wordb"]);
    Ok(())
}

#[test]
fn lexicon_from_iterator_succeeds() -> Result<(), WordleError> {
    let lexicon = Lexicon::from_iterator(vec!["", "worda", "Wordb "])?;

    assert_eq!(lexicon.len(), 2);
    assert_words_eq!(lexicon, ["worda", "wordb"]);
    Ok(())
}

#[test]
fn lexicon_from_string_iterator_succeeds() -> Result<(), WordleError> {
    let lexicon = Lexicon::from_iterator(vec![
        "".to_string(),
        "worda".to_string(),
        "Wordb ".to_string(),
    ])?;

    assert_eq!(lexicon.len(), 2);
    assert_words_eq!(lexicon, ["worda", "wordb"]);
    Ok(())
}

#[test]
fn lexicon_keeps_first_of_repeated_words() -> Result<(), WordleError> {
    let lexicon = Lexicon::from_iterator(vec!["slate", "crane", "SLATE", "trace", "crane"])?;

    assert_words_eq!(lexicon, ["slate", "crane", "trace"]);
    Ok(())
}

#[test]
fn lexicon_from_reader_mismatched_word_length_fails() {
    let cursor = Cursor::new(String::from("\nlongword\n   short\n"));

    assert_matches!(Lexicon::from_reader(cursor), Err(WordleError::WordLength(8)));
}

#[test]
fn lexicon_from_iterator_unsupported_letter_fails() {
    assert_matches!(
        Lexicon::from_iterator(vec!["crane", "it's!"]),
        Err(WordleError::InvalidLetter('\''))
    );
}

#[test]
fn word_rejects_invalid_input() {
    assert_matches!("cr4ne".parse::<Word>(), Err(WordleError::InvalidLetter('4')));
    assert_matches!("cran".parse::<Word>(), Err(WordleError::WordLength(4)));
}

#[test]
fn frequency_table_from_iterator() -> Result<(), WordleError> {
    let frequencies = FrequencyTable::from_iterator(vec![("crane", 2.5e-6), ("slate", 1.0e-5)])?;

    assert_eq!(frequencies.len(), 2);
    assert_eq!(frequencies.weight(&"slate".parse()?), 1.0e-5);
    assert_eq!(frequencies.weight(&"trace".parse()?), 0.0);
    Ok(())
}

#[test]
fn frequency_table_rejects_bad_words() {
    assert_matches!(
        FrequencyTable::from_iterator(vec![("toolong", 1.0)]),
        Err(WordleError::WordLength(7))
    );
}
