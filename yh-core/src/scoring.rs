//! Pure scoring rules.
//!
//! Every function takes five face values (1..=6, any order) and is
//! referentially transparent. Totals read a `Scorecard`, treating open slots as 0.

use crate::category::{Category, NUM_CATS};
use crate::state::Scorecard;

/// Five face values.
pub type Dice = [u8; 5];

pub const FULL_HOUSE_POINTS: u32 = 25;
pub const SMALL_STRAIGHT_POINTS: u32 = 30;
pub const LARGE_STRAIGHT_POINTS: u32 = 40;
pub const YAHTZEE_POINTS: u32 = 50;
pub const YAHTZEE_BONUS_POINTS: u32 = 100;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS_POINTS: u32 = 35;

const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

fn face_counts(dice: &Dice) -> [u8; 6] {
    let mut counts = [0u8; 6];
    for &d in dice {
        debug_assert!((1..=6).contains(&d), "die out of range: {}", d);
        counts[(d - 1) as usize] += 1;
    }
    counts
}

pub fn sum_of_value(dice: &Dice, value: u8) -> u32 {
    dice.iter()
        .filter(|&&d| d == value)
        .map(|&d| u32::from(d))
        .sum()
}

pub fn sum_all_dice(dice: &Dice) -> u32 {
    dice.iter().map(|&d| u32::from(d)).sum()
}

/// Some face shows on at least `n` dice.
pub fn has_n_of_a_kind(dice: &Dice, n: u8) -> bool {
    face_counts(dice).iter().any(|&c| c >= n)
}

/// Exactly three of one face and two of another. Five of a kind does not qualify.
pub fn is_full_house(dice: &Dice) -> bool {
    let counts = face_counts(dice);
    counts.contains(&3) && counts.contains(&2)
}

pub fn is_small_straight(dice: &Dice) -> bool {
    let counts = face_counts(dice);
    SMALL_STRAIGHTS
        .iter()
        .any(|run| run.iter().all(|&v| counts[(v - 1) as usize] > 0))
}

/// Five distinct values forming 1-5 or 2-6.
pub fn is_large_straight(dice: &Dice) -> bool {
    let counts = face_counts(dice);
    if counts.iter().any(|&c| c > 1) {
        return false;
    }
    // Five distinct faces out of six: exactly one face is missing, and it must be an end.
    counts[0] == 0 || counts[5] == 0
}

pub fn is_yahtzee(dice: &Dice) -> bool {
    has_n_of_a_kind(dice, 5)
}

/// Points `dice` would bank in `cat`.
pub fn potential_score(dice: &Dice, cat: Category) -> u32 {
    match cat {
        Category::Ones => sum_of_value(dice, 1),
        Category::Twos => sum_of_value(dice, 2),
        Category::Threes => sum_of_value(dice, 3),
        Category::Fours => sum_of_value(dice, 4),
        Category::Fives => sum_of_value(dice, 5),
        Category::Sixes => sum_of_value(dice, 6),
        Category::ThreeOfAKind => {
            if has_n_of_a_kind(dice, 3) {
                sum_all_dice(dice)
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if has_n_of_a_kind(dice, 4) {
                sum_all_dice(dice)
            } else {
                0
            }
        }
        Category::FullHouse => {
            if is_full_house(dice) {
                FULL_HOUSE_POINTS
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if is_small_straight(dice) {
                SMALL_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if is_large_straight(dice) {
                LARGE_STRAIGHT_POINTS
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if is_yahtzee(dice) {
                YAHTZEE_POINTS
            } else {
                0
            }
        }
        Category::Chance => sum_all_dice(dice),
    }
}

/// Potential scores for all 13 categories, in category index order.
pub fn scores_for_dice(dice: &Dice) -> [u32; NUM_CATS] {
    Category::ALL.map(|cat| potential_score(dice, cat))
}

pub fn upper_total(card: &Scorecard) -> u32 {
    Category::UPPER
        .iter()
        .map(|&c| card.get(c).unwrap_or(0))
        .sum()
}

/// 35 once the upper total reaches 63.
pub fn upper_bonus(card: &Scorecard) -> u32 {
    if upper_total(card) >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS_POINTS
    } else {
        0
    }
}

pub fn lower_total(card: &Scorecard) -> u32 {
    Category::LOWER
        .iter()
        .map(|&c| card.get(c).unwrap_or(0))
        .sum()
}

pub fn grand_total(card: &Scorecard, yahtzee_bonus: u32) -> u32 {
    upper_total(card) + upper_bonus(card) + lower_total(card) + yahtzee_bonus
}

pub fn is_scorecard_complete(card: &Scorecard) -> bool {
    card.scored_count() == NUM_CATS
}
