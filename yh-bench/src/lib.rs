//! Shared inputs for the criterion benches.

use yh_core::{roll5, Dice, EventKey};

/// `n` reproducible five-dice hands.
pub fn dice_samples(n: usize, seed: u64) -> Vec<Dice> {
    (0..n)
        .map(|i| {
            roll5(EventKey {
                game_seed: seed.wrapping_add((i / 39) as u64),
                round_idx: ((i / 3) % 13) as u8,
                roll_idx: (i % 3) as u8,
            })
        })
        .collect()
}
