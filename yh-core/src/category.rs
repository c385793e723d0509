//! Scoring categories (13-way closed enum).
//!
//! Index order is fixed: the six upper categories first (ones..sixes), then the
//! seven lower ones. Scorecard slots and action indices rely on it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NUM_CATS: usize = 13;
pub const NUM_UPPER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yahtzee,
    Chance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl Category {
    /// All categories in index order.
    pub const ALL: [Category; NUM_CATS] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    pub const UPPER: [Category; NUM_UPPER] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    pub const LOWER: [Category; NUM_CATS - NUM_UPPER] = [
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yahtzee,
        Category::Chance,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Category> {
        Self::ALL.get(idx).copied()
    }

    pub const fn is_upper(self) -> bool {
        self.index() < NUM_UPPER
    }

    /// Face value counted by an upper category (1..=6), `None` for lower categories.
    pub const fn upper_face(self) -> Option<u8> {
        if self.is_upper() {
            Some(self.index() as u8 + 1)
        } else {
            None
        }
    }

    /// Stable camelCase key (matches the serde representation).
    pub const fn key(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "threeOfAKind",
            Category::FourOfAKind => "fourOfAKind",
            Category::FullHouse => "fullHouse",
            Category::SmallStraight => "smallStraight",
            Category::LargeStraight => "largeStraight",
            Category::Yahtzee => "yahtzee",
            Category::Chance => "chance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yahtzee => "Yahtzee",
            Category::Chance => "Chance",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Category::Ones => "Sum of all ones",
            Category::Twos => "Sum of all twos",
            Category::Threes => "Sum of all threes",
            Category::Fours => "Sum of all fours",
            Category::Fives => "Sum of all fives",
            Category::Sixes => "Sum of all sixes",
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Chance => "Sum of all dice",
            Category::FullHouse => "25 points",
            Category::SmallStraight => "30 points",
            Category::LargeStraight => "40 points",
            Category::Yahtzee => "50 points",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepts the camelCase key, the display label, or snake/kebab case spellings
/// (`threeOfAKind`, `Three of a Kind`, `three_of_a_kind`).
impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let want = normalize(s);
        if want.is_empty() {
            return Err(ParseCategoryError(s.to_string()));
        }
        Category::ALL
            .into_iter()
            .find(|c| normalize(c.key()) == want)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}
