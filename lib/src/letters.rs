use crate::results::WordleError;
use std::result::Result;

/// The number of letters in every word handled by this crate.
pub const WORD_LENGTH: usize = 5;

/// The number of letters in the alphabet.
pub const NUM_LETTERS: usize = 26;

/// The supported letters, in index order.
pub const ALPHABET: [char; NUM_LETTERS] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Returns the dense index of the given letter, in `[0, 26)`.
///
/// Upper-case letters are treated as their lower-case equivalent.
///
/// ```
/// use wordle_entropy::details::encode_letter;
/// use wordle_entropy::WordleError;
///
/// assert_eq!(encode_letter('a'), Ok(0));
/// assert_eq!(encode_letter('Z'), Ok(25));
/// assert_eq!(encode_letter('3'), Err(WordleError::InvalidLetter('3')));
/// ```
pub fn encode_letter(letter: char) -> Result<u8, WordleError> {
    let lower = letter.to_ascii_lowercase();
    if lower.is_ascii_lowercase() {
        return Ok(lower as u8 - b'a');
    }
    Err(WordleError::InvalidLetter(letter))
}

/// Returns the letter with the given index.
///
/// Panics if `index` is not less than [`NUM_LETTERS`].
pub fn decode_letter(index: u8) -> char {
    ALPHABET[index as usize]
}

/// Encodes each letter of a [`WORD_LENGTH`]-letter word.
pub fn encode_word(word: &str) -> Result<[u8; WORD_LENGTH], WordleError> {
    let num_chars = word.chars().count();
    if num_chars != WORD_LENGTH {
        return Err(WordleError::WordLength(num_chars));
    }
    let mut letters = [0; WORD_LENGTH];
    for (slot, letter) in letters.iter_mut().zip(word.chars()) {
        *slot = encode_letter(letter)?;
    }
    Ok(letters)
}

/// Counts how many times each letter occurs in the given encoded letters.
pub fn letter_counts(letters: &[u8]) -> [u8; NUM_LETTERS] {
    let mut counts = [0; NUM_LETTERS];
    for letter in letters {
        counts[*letter as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_every_letter() -> Result<(), WordleError> {
        for (index, letter) in ALPHABET.iter().enumerate() {
            assert_eq!(encode_letter(*letter)?, index as u8);
            assert_eq!(decode_letter(index as u8), *letter);
        }
        Ok(())
    }

    #[test]
    fn encode_letter_rejects_non_letters() {
        assert_eq!(encode_letter('1'), Err(WordleError::InvalidLetter('1')));
        assert_eq!(encode_letter('-'), Err(WordleError::InvalidLetter('-')));
        assert_eq!(encode_letter(' '), Err(WordleError::InvalidLetter(' ')));
        assert_eq!(encode_letter('é'), Err(WordleError::InvalidLetter('é')));
    }

    #[test]
    fn encode_word_success() -> Result<(), WordleError> {
        assert_eq!(encode_word("crane")?, [2, 17, 0, 13, 4]);
        assert_eq!(encode_word("CRANE")?, [2, 17, 0, 13, 4]);
        Ok(())
    }

    #[test]
    fn encode_word_wrong_length() {
        assert_eq!(encode_word("cran"), Err(WordleError::WordLength(4)));
        assert_eq!(encode_word("cranes"), Err(WordleError::WordLength(6)));
    }

    #[test]
    fn encode_word_bad_letter() {
        assert_eq!(encode_word("cr4ne"), Err(WordleError::InvalidLetter('4')));
    }

    #[test]
    fn letter_counts_with_repeats() -> Result<(), WordleError> {
        let counts = letter_counts(&encode_word("llama")?);

        assert_eq!(counts[encode_letter('l')? as usize], 2);
        assert_eq!(counts[encode_letter('a')? as usize], 2);
        assert_eq!(counts[encode_letter('m')? as usize], 1);
        assert_eq!(counts.iter().map(|count| *count as u32).sum::<u32>(), 5);
        Ok(())
    }
}
