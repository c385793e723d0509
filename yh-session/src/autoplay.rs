//! Autoplay strategies and batch simulation (used by `yh sim` and the benches).

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;
use yh_core::{
    apply_action, initial_state, legal_action_mask, legal_actions, potential_score, upper_bonus,
    upper_total, Action, ApplyError, Category, DiceSource, GameState, NUM_DICE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform over the legal actions.
    Random,
    /// Keep the most common face, bank a made hand early, otherwise the best slot.
    Greedy,
}

#[derive(Debug, Error)]
#[error("unknown strategy `{0}` (expected greedy|random)")]
pub struct ParseStrategyError(pub String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Strategy::Random),
            "greedy" => Ok(Strategy::Greedy),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Slots to sacrifice first when nothing scores.
const SCRATCH_ORDER: [Category; 13] = [
    Category::Ones,
    Category::Yahtzee,
    Category::Twos,
    Category::LargeStraight,
    Category::FourOfAKind,
    Category::Threes,
    Category::SmallStraight,
    Category::FullHouse,
    Category::ThreeOfAKind,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::Chance,
];

/// Pick the next action for `state`. `None` once the game is over.
pub fn choose_action(state: &GameState, strategy: Strategy, rng: &mut ChaCha8Rng) -> Option<Action> {
    let legal = legal_actions(legal_action_mask(state, false));
    if legal.is_empty() {
        return None;
    }
    match strategy {
        Strategy::Random => Some(legal[rng.gen_range(0..legal.len())]),
        Strategy::Greedy => Some(greedy_action(state)),
    }
}

fn greedy_action(state: &GameState) -> Action {
    if !state.has_rolled() {
        return Action::Roll;
    }
    let dice = state.dice_values();

    // Made hands worth a fixed bonus are banked immediately.
    for cat in [Category::Yahtzee, Category::LargeStraight, Category::FullHouse] {
        if !state.scorecard.is_scored(cat) && potential_score(&dice, cat) > 0 {
            return Action::Score(cat);
        }
    }

    if state.rolls_left > 0 {
        let keep = most_common_face(&dice);
        for die in &state.dice {
            let want = die.value == keep;
            if die.is_held != want {
                return Action::ToggleHold(die.id);
            }
        }
        return Action::Roll;
    }

    Action::Score(best_category(state))
}

/// Most frequent face; ties go to the higher face.
fn most_common_face(dice: &[u8; NUM_DICE]) -> u8 {
    let mut counts = [0u8; 7];
    for &d in dice {
        counts[d as usize] += 1;
    }
    (1..=6u8)
        .max_by_key(|&f| (counts[f as usize], f))
        .unwrap_or(6)
}

fn best_category(state: &GameState) -> Category {
    let dice = state.dice_values();
    let best = state
        .scorecard
        .open_categories()
        .map(|c| (potential_score(&dice, c), c))
        .filter(|&(p, _)| p > 0)
        .max_by_key(|&(p, c)| (p, std::cmp::Reverse(c.index())));
    if let Some((_, c)) = best {
        return c;
    }
    SCRATCH_ORDER
        .into_iter()
        .find(|c| !state.scorecard.is_scored(*c))
        .unwrap_or(Category::Chance)
}

/// Play one full game from the initial state.
pub fn play_game(
    dice: &mut DiceSource,
    strategy: Strategy,
    rng: &mut ChaCha8Rng,
) -> Result<GameState, ApplyError> {
    let mut state = initial_state();
    while let Some(action) = choose_action(&state, strategy, rng) {
        state = apply_action(state, action, dice)?;
    }
    Ok(state)
}

pub struct SimulationResult {
    pub scores: Vec<u32>,
    pub bonus_count: usize,
    pub upper_totals: Vec<u32>,
    pub yahtzee_bonus_games: usize,
}

impl SimulationResult {
    pub fn bonus_rate(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.bonus_count as f64 / self.scores.len() as f64
    }

    /// Mean of the upper-section sums (before the 35-point bonus).
    pub fn mean_upper_total(&self) -> f64 {
        if self.upper_totals.is_empty() {
            return 0.0;
        }
        self.upper_totals.iter().map(|&u| u as f64).sum::<f64>() / self.upper_totals.len() as f64
    }
}

/// Play `n` games with seeded dice; the same `(n, seed, strategy)` always
/// reproduces the same scores.
pub fn simulate_games(n: usize, seed: u64, strategy: Strategy) -> Result<SimulationResult, ApplyError> {
    let mut dice = DiceSource::new_rng(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5EED_CAFE_F00D_D00D);
    let mut scores = Vec::with_capacity(n);
    let mut upper_totals = Vec::with_capacity(n);
    let mut bonus_count = 0usize;
    let mut yahtzee_bonus_games = 0usize;

    for _ in 0..n {
        let end = play_game(&mut dice, strategy, &mut rng)?;
        scores.push(end.total_score());
        upper_totals.push(upper_total(&end.scorecard));
        if upper_bonus(&end.scorecard) > 0 {
            bonus_count += 1;
        }
        if end.yahtzee_bonus > 0 {
            yahtzee_bonus_games += 1;
        }
    }

    Ok(SimulationResult {
        scores,
        bonus_count,
        upper_totals,
        yahtzee_bonus_games,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub mean: f64,
    pub median: u32,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

/// `None` for an empty slice.
pub fn summarize_scores(scores: &[u32]) -> Option<ScoreSummary> {
    let min = *scores.iter().min()?;
    let max = *scores.iter().max()?;

    let n = scores.len() as f64;
    let (sum, sum_sq) = scores.iter().fold((0f64, 0f64), |(s, sq), &x| {
        let x = x as f64;
        (s + x, sq + x * x)
    });
    let mean = sum / n;
    let std_dev = ((sum_sq / n) - mean * mean).max(0.0).sqrt();

    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let median = sorted[sorted.len() / 2];

    Some(ScoreSummary {
        mean,
        median,
        std_dev,
        min,
        max,
    })
}

/// Bucket scores into bins of `bin` points: (bucket start, count), ascending,
/// including empty buckets between the lowest and highest.
pub fn histogram(scores: &[u32], bin: u32) -> Vec<(u32, usize)> {
    let bin = bin.max(1);
    let mut buckets: BTreeMap<u32, usize> = BTreeMap::new();
    for &s in scores {
        *buckets.entry((s / bin) * bin).or_insert(0) += 1;
    }
    let (Some(&lo), Some(&hi)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };
    (lo..=hi)
        .step_by(bin as usize)
        .map(|b| (b, buckets.get(&b).copied().unwrap_or(0)))
        .collect()
}
