//! Interactive line-oriented game loop for `yh play`.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use yh_core::{Category, GameState, Theme, NUM_DICE, TOTAL_ROUNDS};
use yh_scores::{best_score, rate_result, HighScore, HighScoreStore};
use yh_session::{Cue, Feedback, FeedbackError, Session};

pub const PLAY_HELP: &str = "\
Commands:
    r            roll the unheld dice
    1-5          hold / release a die
    s <cat>      score a category (e.g. `s fullHouse`, `s 3k`, `s chance`)
    p            preview what every open category would score
    m            mute / unmute
    n            new game
    q            quit
    ?            this help
";

/// Terminal bell on a Yahtzee; everything else is silent.
pub struct TerminalFeedback;

impl Feedback for TerminalFeedback {
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError> {
        if cue == Cue::Yahtzee {
            let mut err = io::stderr();
            err.write_all(b"\x07")
                .and_then(|_| err.flush())
                .map_err(|e| FeedbackError::Unavailable(e.to_string()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    pub games_finished: u32,
    pub last_total: Option<u32>,
}

/// Short aliases accepted next to the full category names.
fn parse_category(s: &str) -> Option<Category> {
    let alias = match s.to_ascii_lowercase().as_str() {
        "1" | "1s" => Some(Category::Ones),
        "2" | "2s" => Some(Category::Twos),
        "3" | "3s" => Some(Category::Threes),
        "4" | "4s" => Some(Category::Fours),
        "5" | "5s" => Some(Category::Fives),
        "6" | "6s" => Some(Category::Sixes),
        "3k" => Some(Category::ThreeOfAKind),
        "4k" => Some(Category::FourOfAKind),
        "fh" => Some(Category::FullHouse),
        "ss" | "sm" => Some(Category::SmallStraight),
        "ls" | "lg" => Some(Category::LargeStraight),
        "y" | "yz" => Some(Category::Yahtzee),
        "c" => Some(Category::Chance),
        _ => None,
    };
    alias.or_else(|| s.parse().ok())
}

/// Held dice are bracketed. `system` stays plain since the terminal
/// background is unknown; `light` and `dark` add an ANSI highlight.
fn held_die(value: u8, theme: Theme) -> String {
    match theme {
        Theme::System => format!("[{value}]"),
        Theme::Light => format!("\x1b[1;34m[{value}]\x1b[0m"),
        Theme::Dark => format!("\x1b[1;93m[{value}]\x1b[0m"),
    }
}

pub fn render<W: Write>(out: &mut W, session: &Session, theme: Theme) -> io::Result<()> {
    let st: &GameState = session.state();
    writeln!(
        out,
        "Round {}/{}   rolls left: {}   total: {}{}",
        st.display_round(),
        TOTAL_ROUNDS,
        st.rolls_left,
        session.total_score(),
        if session.is_muted() { "   [muted]" } else { "" }
    )?;
    if st.has_rolled() {
        let dice: Vec<String> = st
            .dice
            .iter()
            .map(|d| {
                if d.is_held {
                    held_die(d.value, theme)
                } else {
                    format!(" {} ", d.value)
                }
            })
            .collect();
        writeln!(out, "Dice: {}", dice.join(" "))?;
    } else {
        writeln!(out, "Dice: (roll to start the round)")?;
    }
    Ok(())
}

fn render_scorecard<W: Write>(out: &mut W, session: &Session, with_preview: bool) -> io::Result<()> {
    let card = &session.state().scorecard;
    for (cat, slot) in card.iter() {
        let cell = match (slot, with_preview) {
            (Some(v), _) => format!("{v:>4}"),
            (None, true) => match session.potential_score(cat) {
                Some(p) => format!("({p:>2})"),
                None => "   -".to_string(),
            },
            (None, false) => "   -".to_string(),
        };
        if with_preview && slot.is_none() {
            writeln!(out, "  {:<16} {}   {}", cat.label(), cell, cat.description())?;
        } else {
            writeln!(out, "  {:<16} {}", cat.label(), cell)?;
        }
        if cat == Category::Sixes {
            let upper = yh_core::upper_total(card);
            writeln!(
                out,
                "  {:<16} {:>4}   (bonus {} at 63)",
                "Upper total",
                upper,
                yh_core::upper_bonus(card)
            )?;
        }
    }
    writeln!(out, "  {:<16} {:>4}", "Yahtzee bonus", session.state().yahtzee_bonus)?;
    Ok(())
}

fn finish_game<W: Write>(
    out: &mut W,
    session: &Session,
    store: &mut dyn HighScoreStore,
    player: &str,
) -> io::Result<u32> {
    let total = session.total_score();
    let previous = match store.load() {
        Ok(scores) => best_score(&scores).unwrap_or(0),
        Err(e) => {
            eprintln!("Could not read high scores: {e}");
            0
        }
    };
    writeln!(out)?;
    render_scorecard(out, session, false)?;
    writeln!(out, "GAME OVER - final score {total}")?;
    writeln!(out, "{}", rate_result(total, previous))?;
    if let Err(e) = store.save(HighScore::now(total, player)) {
        eprintln!("Could not save high score: {e}");
    }
    writeln!(out, "`n` for a new game, `q` to quit.")?;
    Ok(total)
}

/// Run commands from `input` until `q` or end of input.
pub fn run_play<R: BufRead, W: Write>(
    session: &mut Session,
    store: &mut dyn HighScoreStore,
    player: &str,
    theme: Theme,
    input: R,
    out: &mut W,
) -> io::Result<PlayOutcome> {
    let mut outcome = PlayOutcome::default();
    render(out, session, theme)?;

    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };
        match cmd {
            "q" | "quit" => break,
            "?" | "h" | "help" => {
                write!(out, "{PLAY_HELP}")?;
                continue;
            }
            "r" | "roll" => match session.roll_dice() {
                Some(ticket) => {
                    let wait = ticket.remaining(Instant::now());
                    if !wait.is_zero() {
                        writeln!(out, "Rolling...")?;
                        out.flush()?;
                        std::thread::sleep(wait);
                    }
                    session.finish_roll(ticket);
                }
                None => writeln!(out, "Can't roll now.")?,
            },
            "1" | "2" | "3" | "4" | "5" => {
                let die = cmd.as_bytes()[0] - b'1';
                debug_assert!((die as usize) < NUM_DICE);
                if !session.toggle_hold(die) {
                    writeln!(out, "Roll first.")?;
                }
            }
            "s" | "score" => {
                let Some(arg) = parts.next() else {
                    writeln!(out, "Usage: s <category>")?;
                    continue;
                };
                let Some(cat) = parse_category(arg) else {
                    writeln!(out, "Unknown category: {arg}")?;
                    continue;
                };
                match session.score_category(cat) {
                    Some(receipt) => {
                        write!(out, "{}: +{}", cat.label(), receipt.points)?;
                        if receipt.yahtzee_bonus_awarded > 0 {
                            write!(out, " (Yahtzee bonus +{})", receipt.yahtzee_bonus_awarded)?;
                        }
                        writeln!(out)?;
                        if receipt.game_over {
                            let total = finish_game(out, session, store, player)?;
                            outcome.games_finished += 1;
                            outcome.last_total = Some(total);
                            continue;
                        }
                    }
                    None => writeln!(out, "Can't score {} now.", cat.label())?,
                }
            }
            "p" | "preview" => render_scorecard(out, session, true)?,
            "m" | "mute" => {
                let muted = session.toggle_muted();
                writeln!(out, "Sound {}.", if muted { "off" } else { "on" })?;
            }
            "n" | "new" => session.reset_game(),
            other => {
                writeln!(out, "Unknown command `{other}`; `?` for help.")?;
                continue;
            }
        }
        render(out, session, theme)?;
    }
    Ok(outcome)
}
