//! Readability grading for free-text answers
//!
//! Long passages get a grade-level estimate that the UI shows as a badge.
//! Short passages, and passages the formula cannot score, get nothing.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

/// Passages shorter than this many characters are not graded
///
/// Length is counted in Unicode scalar values. Astral characters such as
/// emoji count once here but twice in UTF-16, so passages full of them need
/// more characters to reach the threshold.
pub const DEFAULT_MIN_LENGTH: usize = 280;

/// A grade-level readability formula
pub trait GradeFormula {
    /// Estimated grade level; zero or less means "no estimate"
    fn score(&self, text: &str) -> f64;
}

/// Grade label shown next to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityLabel {
    College,
    Grade11To12,
    Grade9To10,
    Grade7To8,
    Grade5To6,
    Grade4OrLower,
    Unknown,
}

impl ReadabilityLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            ReadabilityLabel::College
        } else if score >= 8.0 {
            ReadabilityLabel::Grade11To12
        } else if score >= 7.0 {
            ReadabilityLabel::Grade9To10
        } else if score >= 6.0 {
            ReadabilityLabel::Grade7To8
        } else if score >= 5.0 {
            ReadabilityLabel::Grade5To6
        } else if score > 0.0 {
            ReadabilityLabel::Grade4OrLower
        } else {
            ReadabilityLabel::Unknown
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadabilityLabel::College => "College",
            ReadabilityLabel::Grade11To12 => "11th–12th grade",
            ReadabilityLabel::Grade9To10 => "9th–10th grade",
            ReadabilityLabel::Grade7To8 => "7th–8th grade",
            ReadabilityLabel::Grade5To6 => "5th–6th grade",
            ReadabilityLabel::Grade4OrLower => "4th grade or lower",
            ReadabilityLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ReadabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual severity of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityBucket {
    Success,
    Warning,
    Danger,
}

impl ReadabilityBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ReadabilityBucket::Danger
        } else if score >= 6.0 {
            ReadabilityBucket::Warning
        } else {
            ReadabilityBucket::Success
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readability {
    pub score: f64,
    pub label: ReadabilityLabel,
    pub bucket: ReadabilityBucket,
}

impl Readability {
    /// Grade a raw score; `None` for zero, negative or NaN scores
    pub fn from_score(score: f64) -> Option<Self> {
        if score.is_nan() || score <= 0.0 {
            return None;
        }

        Some(Self {
            score,
            label: ReadabilityLabel::from_score(score),
            bucket: ReadabilityBucket::from_score(score),
        })
    }
}

/// Grade `text` with the Dale–Chall formula if it is at least `min_length`
/// characters long
pub fn assess(text: Option<&str>, min_length: usize) -> Option<Readability> {
    assess_with(&DaleChall, text, min_length)
}

/// [`assess`] with the default minimum length
pub fn assess_default(text: &str) -> Option<Readability> {
    assess(Some(text), DEFAULT_MIN_LENGTH)
}

/// [`assess`] with any grade formula
pub fn assess_with(formula: &impl GradeFormula, text: Option<&str>, min_length: usize) -> Option<Readability> {
    let text = text.filter(|t| !t.is_empty())?;

    if text.chars().count() < min_length {
        return None;
    }

    let score = formula.score(text);
    let readability = Readability::from_score(score);
    if readability.is_none() {
        tracing::debug!("Readability score {} suppressed", score);
    }
    readability
}

/// The Dale–Chall list of words familiar to most fourth-grade readers
const FAMILIAR_WORD_LIST: &str = include_str!("familiar_words.txt");

static FAMILIAR_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn familiar_words() -> &'static HashSet<&'static str> {
    FAMILIAR_WORDS.get_or_init(|| {
        FAMILIAR_WORD_LIST
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect()
    })
}

/// Dale–Chall readability: any word missing from the familiar list is difficult
#[derive(Debug, Clone, Copy, Default)]
pub struct DaleChall;

impl GradeFormula for DaleChall {
    fn score(&self, text: &str) -> f64 {
        let words: Vec<String> = words(text).collect();
        if words.is_empty() {
            return 0.0;
        }

        let difficult = words.iter().filter(|w| !is_familiar(w)).count();

        let pct_difficult = difficult as f64 / words.len() as f64 * 100.0;
        let words_per_sentence = words.len() as f64 / sentence_count(text) as f64;

        let mut score = 0.1579 * pct_difficult + 0.0496 * words_per_sentence;
        if pct_difficult > 5.0 {
            score += 3.6365;
        }
        score
    }
}

/// Familiar-list lookup that also accepts regular inflections of listed words
/// (plurals, possessives, -ed, -ing, -er, -est)
fn is_familiar(word: &str) -> bool {
    let list = familiar_words();
    let word = word.strip_suffix("'s").unwrap_or(word);
    if list.contains(word) {
        return true;
    }

    const SUFFIXES: [(&str, &str); 11] = [
        ("ies", "y"),
        ("ied", "y"),
        ("es", ""),
        ("s", ""),
        ("ed", ""),
        ("d", ""),
        ("ing", ""),
        ("ing", "e"),
        ("er", ""),
        ("est", ""),
        ("r", ""),
    ];

    SUFFIXES.iter().any(|&(suffix, replacement)| {
        word.strip_suffix(suffix)
            .filter(|stem| !stem.is_empty())
            .is_some_and(|stem| list.contains(format!("{stem}{replacement}").as_str()))
    })
}

/// Lowercased words with surrounding punctuation removed
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| word.chars().any(char::is_alphabetic))
}

fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphabetic))
        .count()
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "The cat sat on the mat. It was a warm day. The dog ran to the park and back. \
        We had jam on our bread. Then we went out to play in the sun. The kids sang a song. \
        Mother made tea for all of us. Dad read a book by the fire. We all went to bed at nine. \
        It was a good day for us all and we slept well. The cat slept on my lap.";

    const COMPLEX: &str = "Administrative organizations necessitate comprehensive documentation. \
        Jurisdictional requirements occasionally complicate notarization procedures considerably. \
        Identification modifications generally necessitate institutional verification. \
        Constitutional considerations regarding governmental registration demonstrate extraordinary complexity. \
        Petitioners unfamiliar with administrative terminology experience considerable difficulty.";

    const LEGAL: &str = "The plaintiff filed a writ. The clerk set the docket. A lien was placed on the deed. \
        The tort claim cites the statute. The bailiff read the decree. The clerk signed the oath. \
        The waiver voids the clause. Counsel sought a stay of the probate order. \
        The writ was served on the tenant. The judge read the brief and set bail.";

    struct Fixed(f64);

    impl GradeFormula for Fixed {
        fn score(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_short_text_is_suppressed() {
        assert!(COMPLEX.chars().count() >= DEFAULT_MIN_LENGTH);
        assert_eq!(assess(Some("Short and simple."), DEFAULT_MIN_LENGTH), None);
        assert_eq!(assess(None, DEFAULT_MIN_LENGTH), None);
        assert_eq!(assess(Some(""), 0), None);
        assert_eq!(assess(Some(COMPLEX), COMPLEX.chars().count() + 1), None);
    }

    #[test]
    fn test_complex_passage_is_danger() {
        let result = assess_default(COMPLEX).expect("complex passage should be graded");
        assert!(result.score >= 8.0, "score was {}", result.score);
        assert_eq!(result.bucket, ReadabilityBucket::Danger);
        assert!(matches!(
            result.label,
            ReadabilityLabel::College | ReadabilityLabel::Grade11To12
        ));
    }

    #[test]
    fn test_simple_passage_is_success() {
        assert!(SIMPLE.chars().count() >= DEFAULT_MIN_LENGTH);
        let result = assess_default(SIMPLE).expect("simple passage should be graded");
        assert!(result.score < 5.0, "score was {}", result.score);
        assert_eq!(result.bucket, ReadabilityBucket::Success);
        assert_eq!(result.label, ReadabilityLabel::Grade4OrLower);
    }

    #[test]
    fn test_unusable_scores_are_suppressed() {
        let text = "x".repeat(DEFAULT_MIN_LENGTH);
        assert_eq!(assess_with(&Fixed(0.0), Some(&text), DEFAULT_MIN_LENGTH), None);
        assert_eq!(assess_with(&Fixed(-1.5), Some(&text), DEFAULT_MIN_LENGTH), None);
        assert_eq!(assess_with(&Fixed(f64::NAN), Some(&text), DEFAULT_MIN_LENGTH), None);
        assert!(assess_with(&Fixed(6.5), Some(&text), DEFAULT_MIN_LENGTH).is_some());
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(ReadabilityLabel::from_score(12.0), ReadabilityLabel::College);
        assert_eq!(ReadabilityLabel::from_score(9.0), ReadabilityLabel::College);
        assert_eq!(ReadabilityLabel::from_score(8.0), ReadabilityLabel::Grade11To12);
        assert_eq!(ReadabilityLabel::from_score(7.5), ReadabilityLabel::Grade9To10);
        assert_eq!(ReadabilityLabel::from_score(6.0), ReadabilityLabel::Grade7To8);
        assert_eq!(ReadabilityLabel::from_score(5.0), ReadabilityLabel::Grade5To6);
        assert_eq!(ReadabilityLabel::from_score(0.1), ReadabilityLabel::Grade4OrLower);
        assert_eq!(ReadabilityLabel::from_score(0.0), ReadabilityLabel::Unknown);
        assert_eq!(ReadabilityLabel::from_score(f64::NAN), ReadabilityLabel::Unknown);
        assert_eq!(ReadabilityLabel::Grade11To12.to_string(), "11th–12th grade");
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(ReadabilityBucket::from_score(8.0), ReadabilityBucket::Danger);
        assert_eq!(ReadabilityBucket::from_score(7.99), ReadabilityBucket::Warning);
        assert_eq!(ReadabilityBucket::from_score(6.0), ReadabilityBucket::Warning);
        assert_eq!(ReadabilityBucket::from_score(5.99), ReadabilityBucket::Success);
    }

    #[test]
    fn test_short_legal_terms_count_as_difficult() {
        assert!(LEGAL.chars().count() >= DEFAULT_MIN_LENGTH);
        let result = assess_default(LEGAL).expect("legal passage should be graded");
        assert!(result.score >= 6.0, "score was {}", result.score);
        assert_ne!(result.bucket, ReadabilityBucket::Success);
    }

    #[test]
    fn test_familiar_words_and_inflections() {
        assert!(is_familiar("house"));
        assert!(is_familiar("played"));
        assert!(is_familiar("cherries"));
        assert!(is_familiar("filed"));
        assert!(is_familiar("kids"));
        assert!(is_familiar("mother's"));
        assert!(!is_familiar("plaintiff"));
        assert!(!is_familiar("lien"));
        assert!(!is_familiar("statute"));
    }

    #[test]
    fn test_words_and_sentences() {
        let found: Vec<String> = words("Hello, world! \"Don't\" -- 42 stop.").collect();
        assert_eq!(found, vec!["hello", "world", "don't", "stop"]);
        assert_eq!(sentence_count("One. Two! Three? ..."), 3);
        assert_eq!(sentence_count("no terminator"), 1);
    }
}
