#[macro_use]
extern crate assert_matches;

use wordle_entropy::*;

use std::result::Result;

fn word(word: &str) -> Word {
    word.parse().unwrap()
}

fn feedback(guess: &str, secret: &str) -> String {
    get_feedback(&word(guess), &word(secret)).to_string()
}

#[test]
fn get_feedback_correct() {
    assert_eq!(feedback("crane", "crane"), "gn gn gn gn gn");
}

#[test]
fn get_feedback_none_match() {
    assert_eq!(feedback("fuzzy", "crane"), "gy gy gy gy gy");
}

#[test]
fn get_feedback_partial() {
    assert_eq!(feedback("sassy", "mesas"), "y y gn gy gy");
    assert_eq!(feedback("speed", "abide"), "gy gy y gy y");
    assert_eq!(feedback("geese", "fence"), "gy gn gy gy gn");
    assert_eq!(feedback("eerie", "theme"), "y gy gy gy gn");
}

#[test]
fn get_feedback_greens_take_priority_over_earlier_yellows() {
    // Both of the secret's l's are matched exactly, so the first l gets nothing.
    assert_eq!(feedback("lolly", "hello"), "gy y gn gn gy");
}

#[test]
fn feedback_pattern_from_labels_accepts_all_symbols() -> Result<(), WordleError> {
    let pattern = FeedbackPattern::from_labels(&["gn", "y", "gy", "gy", "y"])?;

    assert_eq!(
        pattern.labels(),
        &[
            FeedbackLabel::Green,
            FeedbackLabel::Yellow,
            FeedbackLabel::Grey,
            FeedbackLabel::Grey,
            FeedbackLabel::Yellow,
        ]
    );
    Ok(())
}

#[test]
fn feedback_pattern_from_labels_wrong_length() {
    assert_matches!(
        FeedbackPattern::from_labels(&["gn", "y", "gy", "gy"]),
        Err(WordleError::InvalidFeedback(_))
    );
    assert_matches!(
        FeedbackPattern::from_labels(&["gn", "y", "gy", "gy", "y", "y"]),
        Err(WordleError::InvalidFeedback(_))
    );
}

#[test]
fn feedback_pattern_from_labels_unknown_symbol() {
    assert_matches!(
        FeedbackPattern::from_labels(&["green", "y", "gy", "gy", "y"]),
        Err(WordleError::InvalidFeedback(_))
    );
    assert_matches!(
        "gn y gy gy Y".parse::<FeedbackPattern>(),
        Err(WordleError::InvalidFeedback(_))
    );
}

#[test]
fn feedback_pattern_equality() -> Result<(), WordleError> {
    let all_green: FeedbackPattern = "gn gn gn gn gn".parse()?;
    let all_yellow: FeedbackPattern = "y y y y y".parse()?;
    let all_grey: FeedbackPattern = "gy gy gy gy gy".parse()?;

    assert_eq!(all_green, all_green);
    assert!(all_green != all_yellow);
    assert!(all_green != all_grey);
    assert!(all_yellow != all_grey);
    assert_eq!(all_grey.index(), 0);
    assert_eq!(all_green.index() as usize, NUM_PATTERNS - 1);
    Ok(())
}
