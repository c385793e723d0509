//! yh: terminal Yahtzee.
//!
//! Subcommands:
//! - play
//! - scores
//! - sim

mod play;

use std::env;
use std::io;
use std::path::PathBuf;
use std::process;

use yh_core::Config;
use yh_scores::{HighScoreStore, JsonFileStore};
use yh_session::{histogram, simulate_games, summarize_scores, Session, Strategy};

/// Value following `args[i]`, or exit with a usage error.
fn flag_value<'a>(args: &'a [String], i: usize) -> &'a str {
    match args.get(i + 1) {
        Some(v) => v,
        None => {
            eprintln!("Missing value for {}", args[i]);
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(args: &[String], i: usize) -> T {
    let v = flag_value(args, i);
    v.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {} value: {}", args[i], v);
        process::exit(1);
    })
}

fn load_config(path: Option<&PathBuf>) -> Config {
    match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {}", p.display(), e);
            process::exit(1);
        }),
        None => Config::default(),
    }
}

fn cmd_play(args: &[String]) {
    let mut config_path: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut name: Option<String> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh play

USAGE:
    yh play [--config PATH] [--seed S] [--name NAME]

OPTIONS:
    --config PATH   YAML config (default: built-in defaults)
    --seed S        Seed the dice (reproducible game)
    --name NAME     Name saved with the high score (default: from config)
"#
                );
                print!("{}", play::PLAY_HELP);
                return;
            }
            "--config" => {
                config_path = Some(PathBuf::from(flag_value(args, i)));
                i += 2;
            }
            "--seed" => {
                seed = Some(parse_or_exit(args, i));
                i += 2;
            }
            "--name" => {
                name = Some(flag_value(args, i).to_string());
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yh play`: {}", other);
                eprintln!("Run `yh play --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut cfg = load_config(config_path.as_ref());
    if seed.is_some() {
        cfg.session.seed = seed;
    }
    let player = name.unwrap_or_else(|| cfg.scores.player_name.clone());

    let mut session = Session::from_config(&cfg)
        .unwrap_or_else(|e| {
            eprintln!("Failed to start session: {}", e);
            process::exit(1);
        })
        .with_feedback(play::TerminalFeedback);
    let mut store = JsonFileStore::with_capacity(&cfg.scores.path, cfg.scores.max_entries);

    println!("yh {} - type `?` for help", env!("CARGO_PKG_VERSION"));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let theme = cfg.feedback.theme;
    let outcome =
        play::run_play(&mut session, &mut store, &player, theme, stdin.lock(), &mut stdout)
            .unwrap_or_else(|e| {
                eprintln!("I/O error: {}", e);
                process::exit(1);
            });
    if let Err(e) = session.flush() {
        eprintln!("Failed to flush event log: {}", e);
    }
    if outcome.games_finished > 1 {
        println!("Games finished: {}", outcome.games_finished);
    }
}

fn cmd_scores(args: &[String]) {
    let mut config_path: Option<PathBuf> = None;
    let mut clear = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh scores

USAGE:
    yh scores [--config PATH] [--clear]

OPTIONS:
    --config PATH   YAML config (reads scores.path)
    --clear         Delete the high-score table
"#
                );
                return;
            }
            "--config" => {
                config_path = Some(PathBuf::from(flag_value(args, i)));
                i += 2;
            }
            "--clear" => {
                clear = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yh scores`: {}", other);
                eprintln!("Run `yh scores --help` for usage.");
                process::exit(1);
            }
        }
    }

    let cfg = load_config(config_path.as_ref());
    let mut store = JsonFileStore::with_capacity(&cfg.scores.path, cfg.scores.max_entries);
    if clear {
        if let Err(e) = store.clear() {
            eprintln!("Failed to clear {}: {}", store.path().display(), e);
            process::exit(1);
        }
        println!("High scores cleared.");
        return;
    }

    let scores = store.load().unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", store.path().display(), e);
        process::exit(1);
    });
    if scores.is_empty() {
        println!("No high scores yet.");
        return;
    }
    println!("HIGH SCORES");
    for (rank, h) in scores.iter().enumerate() {
        println!("{:>2}. {:>4}  {:<12} {}", rank + 1, h.score, h.player_name, h.date);
    }
}

fn cmd_sim(args: &[String]) {
    let mut games: usize = 1_000;
    let mut seed: u64 = 0;
    let mut strategy = Strategy::Greedy;
    let mut no_hist = false;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yh sim

USAGE:
    yh sim [--games N] [--seed S] [--strategy greedy|random] [--no-hist]

OPTIONS:
    --games N        Number of games to simulate (default: 1000)
    --seed S         RNG seed (default: 0)
    --strategy NAME  greedy | random (default: greedy)
    --no-hist        Skip printing histogram
"#
                );
                return;
            }
            "--games" => {
                games = parse_or_exit(args, i);
                i += 2;
            }
            "--seed" => {
                seed = parse_or_exit(args, i);
                i += 2;
            }
            "--strategy" => {
                strategy = flag_value(args, i).parse().unwrap_or_else(|e| {
                    eprintln!("{}", e);
                    process::exit(1);
                });
                i += 2;
            }
            "--no-hist" => {
                no_hist = true;
                i += 1;
            }
            other => {
                eprintln!("Unknown option for `yh sim`: {}", other);
                eprintln!("Run `yh sim --help` for usage.");
                process::exit(1);
            }
        }
    }

    let report = simulate_games(games, seed, strategy).unwrap_or_else(|e| {
        eprintln!("Simulation failed: {}", e);
        process::exit(1);
    });
    let Some(s) = summarize_scores(&report.scores) else {
        println!("No games played.");
        return;
    };

    println!("Evaluation:");
    println!("  - Strategy: {:?}", strategy);
    println!("  - Games: {}", games);
    println!(
        "  - Score: mean={:.2}, median={}, std={:.2}, min={}, max={}",
        s.mean, s.median, s.std_dev, s.min, s.max
    );
    println!("  - Upper total: mean={:.2}", report.mean_upper_total());
    println!("  - Upper bonus rate: {:.1}%", report.bonus_rate() * 100.0);
    println!("  - Games with Yahtzee bonus: {}", report.yahtzee_bonus_games);

    if !no_hist {
        print_histogram(&report.scores);
    }
}

fn print_histogram(scores: &[u32]) {
    let buckets = histogram(scores, 10);
    let max_count = buckets.iter().map(|&(_, c)| c).max().unwrap_or(1).max(1);
    let bar_width = 50usize;

    println!("\nScore histogram (N={}, bin=10):", scores.len());
    println!("{}", "─".repeat(70));
    for (bucket, count) in buckets {
        let bar = "█".repeat(count * bar_width / max_count);
        println!(
            "{:3}-{:3} │{:<50} {:4} ({:.1}%)",
            bucket,
            bucket + 9,
            bar,
            count,
            (count as f64 / scores.len() as f64) * 100.0
        );
    }
    println!("{}", "─".repeat(70));
}

fn print_help() {
    eprintln!(
        r#"yh - terminal Yahtzee

USAGE:
    yh <COMMAND> [OPTIONS]

COMMANDS:
    play        Play a game in the terminal
    scores      List saved high scores
    sim         Simulate games with an autoplay strategy

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Run `yh <COMMAND> --help` for command options.
"#
    );
}

fn print_version() {
    println!("yh {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "play" => {
            cmd_play(&args[2..]);
        }
        "scores" => {
            cmd_scores(&args[2..]);
        }
        "sim" => {
            cmd_sim(&args[2..]);
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run `yh --help` for usage.");
            process::exit(1);
        }
    }
}
