use crate::action::{index_to_action, Action, A};
use crate::category::{Category, NUM_CATS};
use crate::chance::DiceSource;
use crate::engine::{apply_action, initial_state, is_terminal, validate_state, ApplyError};
use crate::legal::{is_legal, legal_action_mask, legal_actions};
use crate::scoring::grand_total;
use crate::state::{GameState, MAX_ROLLS};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn assert_invariants(s: &GameState) {
    assert!(s.rolls_left <= MAX_ROLLS);
    assert!((1..=13).contains(&s.current_round));
    assert_eq!(s.yahtzee_bonus % 100, 0);
    for (i, d) in s.dice.iter().enumerate() {
        assert_eq!(d.id as usize, i);
        assert!((1..=6).contains(&d.value));
    }
}

/// State mid-round (one roll used) showing `values`.
fn rolled_with(values: [u8; 5]) -> GameState {
    let mut s = initial_state();
    s.rolls_left = MAX_ROLLS - 1;
    for (d, v) in s.dice.iter_mut().zip(values) {
        d.value = v;
    }
    s
}

fn score(s: GameState, cat: Category) -> GameState {
    let mut dice = DiceSource::new_deterministic(0);
    apply_action(s, Action::Score(cat), &mut dice).unwrap()
}

#[test]
fn legality_enforcement_basic() {
    let mut dice = DiceSource::new_deterministic(123);
    let s = initial_state();

    // No roll yet => scoring and holding are illegal.
    let err = apply_action(s, Action::Score(Category::Chance), &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));
    let err = apply_action(s, Action::ToggleHold(0), &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));

    // rolls_left == 0 => Roll illegal.
    let mut s2 = rolled_with([1, 2, 3, 4, 5]);
    s2.rolls_left = 0;
    let err = apply_action(s2, Action::Roll, &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));

    // Die id out of range.
    let err = apply_action(s2, Action::ToggleHold(5), &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));

    // Scoring an already scored category.
    let mut s3 = rolled_with([1, 2, 3, 4, 5]);
    s3.scorecard.record(Category::Ones, 3);
    s3.current_round = 2;
    let err = apply_action(s3, Action::Score(Category::Ones), &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::IllegalAction { .. }));
}

#[test]
fn invalid_state_is_rejected() {
    let mut dice = DiceSource::new_deterministic(1);
    let mut s = initial_state();
    s.dice[2].value = 7;
    let err = apply_action(s, Action::Roll, &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::InvalidState { .. }));

    let mut s = initial_state();
    s.current_round = 14;
    let err = apply_action(s, Action::Roll, &mut dice).unwrap_err();
    assert!(matches!(err, ApplyError::InvalidState { .. }));
}

#[test]
fn inconsistent_snapshots_are_rejected() {
    // Round ahead of the scorecard.
    let mut s = initial_state();
    s.current_round = 13;
    assert!(matches!(
        validate_state(&s),
        Err(ApplyError::InvalidState { .. })
    ));

    // Round behind the scorecard.
    let mut s = initial_state();
    s.scorecard.record(Category::Chance, 20);
    assert!(validate_state(&s).is_err());
    s.current_round = 2;
    assert!(validate_state(&s).is_ok());

    // Game over flag without a full card, and a full card without the flag.
    let mut s = initial_state();
    s.is_game_over = true;
    assert!(validate_state(&s).is_err());
    let mut full = initial_state();
    for c in Category::ALL {
        full.scorecard.record(c, 0);
    }
    full.current_round = 13;
    assert!(validate_state(&full).is_err());
    full.is_game_over = true;
    assert!(validate_state(&full).is_ok());

    // Joker bonus without a banked Yahtzee.
    let mut s = initial_state();
    s.yahtzee_bonus = 100;
    assert!(validate_state(&s).is_err());
    s.scorecard.record(Category::Yahtzee, 50);
    s.current_round = 2;
    assert!(validate_state(&s).is_ok());
}

#[test]
fn round_never_passes_thirteen_from_valid_states() {
    let mut dice = DiceSource::new_deterministic(8);
    let mut s = initial_state();
    s.current_round = 13;
    assert!(apply_action(s, Action::Roll, &mut dice).is_err());

    let mut s = initial_state();
    for c in Category::ALL.into_iter().skip(1) {
        s.scorecard.record(c, 0);
    }
    s.current_round = 13;
    s = apply_action(s, Action::Roll, &mut dice).unwrap();
    s = apply_action(s, Action::Score(Category::Ones), &mut dice).unwrap();
    assert_eq!(s.current_round, 13);
    assert!(s.is_game_over);
    assert!(validate_state(&s).is_ok());
}

#[test]
fn roll_rerolls_only_unheld_dice_and_consumes_a_roll() {
    let mut dice = DiceSource::new_rng(5);
    let mut s = rolled_with([6, 6, 1, 2, 3]);
    s = apply_action(s, Action::ToggleHold(0), &mut dice).unwrap();
    s = apply_action(s, Action::ToggleHold(1), &mut dice).unwrap();

    let before = s;
    let after = apply_action(s, Action::Roll, &mut dice).unwrap();
    assert_eq!(after.rolls_left, before.rolls_left - 1);
    assert_eq!(after.dice[0], before.dice[0]);
    assert_eq!(after.dice[1], before.dice[1]);
    assert_eq!(after.scorecard, before.scorecard);
    assert_eq!(after.current_round, before.current_round);
    assert_invariants(&after);
}

#[test]
fn roll_with_no_rolls_left_leaves_state_unchanged() {
    let mut dice = DiceSource::new_rng(5);
    let mut s = initial_state();
    for _ in 0..MAX_ROLLS {
        s = apply_action(s, Action::Roll, &mut dice).unwrap();
    }
    assert_eq!(s.rolls_left, 0);
    let before = s;
    assert!(apply_action(s, Action::Roll, &mut dice).is_err());
    assert_eq!(s, before);
}

#[test]
fn toggle_hold_flips_one_die_only() {
    let mut dice = DiceSource::new_deterministic(3);
    let s = rolled_with([1, 2, 3, 4, 5]);
    let t = apply_action(s, Action::ToggleHold(2), &mut dice).unwrap();
    assert!(t.dice[2].is_held);
    for i in [0usize, 1, 3, 4] {
        assert_eq!(t.dice[i], s.dice[i]);
    }
    assert_eq!(t.rolls_left, s.rolls_left);
    let u = apply_action(t, Action::ToggleHold(2), &mut dice).unwrap();
    assert_eq!(u, s);
}

#[test]
fn scenario_all_ones() {
    let s = rolled_with([1, 1, 1, 1, 1]);
    assert_eq!(score(s, Category::Ones).scorecard.get(Category::Ones), Some(5));
    assert_eq!(
        score(s, Category::FullHouse).scorecard.get(Category::FullHouse),
        Some(0)
    );
    assert_eq!(
        score(s, Category::Yahtzee).scorecard.get(Category::Yahtzee),
        Some(50)
    );
}

#[test]
fn scoring_zero_banks_zero_and_advances_round() {
    let s = rolled_with([1, 2, 3, 4, 5]);
    let t = score(s, Category::Sixes);
    assert_eq!(t.scorecard.get(Category::Sixes), Some(0));
    assert_eq!(t.current_round, 2);
    assert_eq!(t.rolls_left, MAX_ROLLS);
    assert!(t.dice.iter().all(|d| !d.is_held));
    // Dice values stay on the table until the next roll.
    assert_eq!(t.dice_values(), [1, 2, 3, 4, 5]);
    assert!(!t.is_game_over);
}

#[test]
fn rescoring_is_refused_and_state_untouched() {
    let mut dice = DiceSource::new_deterministic(0);
    let s = score(rolled_with([2, 2, 2, 5, 5]), Category::FullHouse);
    let mut again = s;
    again.rolls_left = 1;
    again.dice.iter_mut().for_each(|d| d.value = 6);
    let before = again;
    assert!(apply_action(again, Action::Score(Category::FullHouse), &mut dice).is_err());
    assert_eq!(again, before);
    assert_eq!(again.scorecard.get(Category::FullHouse), Some(25));
}

#[test]
fn yahtzee_bonus_after_yahtzee_scored_fifty() {
    let s = score(rolled_with([4, 4, 4, 4, 4]), Category::Yahtzee);
    assert_eq!(s.scorecard.get(Category::Yahtzee), Some(50));
    assert_eq!(s.yahtzee_bonus, 0);

    // Another Yahtzee later, banked as a full house (which scores 0 under these rules).
    let mut s2 = s;
    s2.rolls_left = 1;
    s2.dice.iter_mut().for_each(|d| d.value = 2);
    let t = score(s2, Category::FullHouse);
    assert_eq!(t.yahtzee_bonus, 100);
    assert_eq!(t.scorecard.get(Category::FullHouse), Some(0));

    // And again, banked in twos.
    let mut t2 = t;
    t2.rolls_left = 2;
    t2.dice.iter_mut().for_each(|d| d.value = 2);
    let u = score(t2, Category::Twos);
    assert_eq!(u.yahtzee_bonus, 200);
    assert_eq!(u.scorecard.get(Category::Twos), Some(10));
}

#[test]
fn no_yahtzee_bonus_when_yahtzee_was_scratched() {
    let s = score(rolled_with([1, 2, 3, 4, 6]), Category::Yahtzee);
    assert_eq!(s.scorecard.get(Category::Yahtzee), Some(0));
    let mut s2 = s;
    s2.rolls_left = 2;
    s2.dice.iter_mut().for_each(|d| d.value = 5);
    let t = score(s2, Category::Fives);
    assert_eq!(t.yahtzee_bonus, 0);
    assert_eq!(t.scorecard.get(Category::Fives), Some(25));
}

#[test]
fn deterministic_reproducibility_same_seed_same_actions() {
    let actions = [
        Action::Roll,
        Action::ToggleHold(0),
        Action::Roll,
        Action::Score(Category::Chance),
        Action::Roll,
        Action::Score(Category::Ones),
    ];

    let run = |seed: u64| {
        let mut dice = DiceSource::new_deterministic(seed);
        let mut s = initial_state();
        for &a in &actions {
            s = apply_action(s, a, &mut dice).unwrap();
        }
        s
    };

    assert_eq!(run(999), run(999));
}

fn random_playout(dice: &mut DiceSource, chooser_seed: u64) -> (GameState, usize, usize) {
    let mut s = initial_state();
    let mut chooser = ChaCha8Rng::seed_from_u64(chooser_seed);
    let mut scores = 0usize;
    let mut round_increments = 0usize;

    for _step in 0..10_000 {
        assert_invariants(&s);
        if is_terminal(&s) {
            break;
        }

        let legal = legal_action_mask(&s, false);
        let idxs: Vec<usize> = (0..A).filter(|&i| is_legal(legal, i)).collect();
        assert!(!idxs.is_empty());

        let a = index_to_action(idxs[chooser.gen_range(0..idxs.len())]);
        let before = s;
        s = apply_action(s, a, dice).unwrap();
        if matches!(a, Action::Score(_)) {
            scores += 1;
            if s.current_round == before.current_round + 1 {
                round_increments += 1;
            }
            // Game over exactly on the 13th score.
            assert_eq!(s.is_game_over, scores == NUM_CATS);
        }
    }
    (s, scores, round_increments)
}

#[test]
fn random_playout_terminates_after_13_scores_deterministic_mode() {
    let mut dice = DiceSource::new_deterministic(1234);
    let (s, scores, incs) = random_playout(&mut dice, 7);
    assert!(is_terminal(&s), "playout did not terminate");
    assert_eq!(scores, 13);
    assert_eq!(incs, 12);
    assert_eq!(s.current_round, 13);
    assert_eq!(s.total_score(), grand_total(&s.scorecard, s.yahtzee_bonus));
}

#[test]
fn random_playout_terminates_after_13_scores_rng_mode() {
    for seed in 0..20u64 {
        let mut dice = DiceSource::new_rng(seed);
        let (s, scores, incs) = random_playout(&mut dice, seed ^ 0xABCD);
        assert!(is_terminal(&s));
        assert_eq!(scores, 13);
        assert_eq!(incs, 12);
        assert_eq!(s.current_round, 13);
        assert_eq!(s.display_round(), 13);
    }
}

#[test]
fn game_over_accepts_nothing() {
    let (s, _, _) = random_playout(&mut DiceSource::new_rng(42), 1);
    assert!(s.is_game_over);
    assert_eq!(legal_action_mask(&s, false), 0);
    assert!(legal_actions(legal_action_mask(&s, false)).is_empty());
    let mut dice = DiceSource::new_rng(0);
    assert!(apply_action(s, Action::Roll, &mut dice).is_err());
}
