//! Sample card items.

use serde::{Deserialize, Serialize};

const SAMPLE_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis \
    nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat";

/// Word counts `(top, left, right)` of the sample cards.
const SAMPLE_WORD_COUNTS: [(usize, usize, usize); 9] = [
    (2, 1, 1),
    (3, 3, 3),
    (5, 12, 7),
    (7, 5, 6),
    (9, 7, 15),
    (1, 9, 9),
    (3, 1, 4),
    (4, 4, 1),
    (10, 8, 6),
];

/// A card with a headline above two side-by-side captions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    /// Text spanning the card width.
    #[serde(default)]
    pub top_text: String,
    /// Left caption.
    #[serde(default)]
    pub left_text: String,
    /// Right caption.
    #[serde(default)]
    pub right_text: String,
}

impl Card {
    /// Create a new card.
    pub fn new(
        top_text: impl Into<String>,
        left_text: impl Into<String>,
        right_text: impl Into<String>,
    ) -> Self {
        Self {
            top_text: top_text.into(),
            left_text: left_text.into(),
            right_text: right_text.into(),
        }
    }

    /// Nine cards with varied text lengths, each text a prefix of a lorem
    /// ipsum sentence.
    pub fn samples() -> Vec<Card> {
        SAMPLE_WORD_COUNTS
            .iter()
            .map(|&(top, left, right)| Card::new(leading_words(top), leading_words(left), leading_words(right)))
            .collect()
    }
}

fn leading_words(count: usize) -> String {
    SAMPLE_TEXT
        .split_whitespace()
        .take(count)
        .collect::<Vec<_>>()
        .join(" ")
}
