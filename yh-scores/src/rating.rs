//! End-of-game verdict shown on the results screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    NewHighScore,
    Legendary,
    Amazing,
    GreatGame,
    WellDone,
    GoodEffort,
    KeepTrying,
}

impl Rating {
    pub fn message(self) -> &'static str {
        match self {
            Rating::NewHighScore => "NEW HIGH SCORE!",
            Rating::Legendary => "LEGENDARY!",
            Rating::Amazing => "AMAZING!",
            Rating::GreatGame => "GREAT GAME!",
            Rating::WellDone => "WELL DONE!",
            Rating::GoodEffort => "GOOD EFFORT!",
            Rating::KeepTrying => "KEEP TRYING!",
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// `previous_best` is the best score saved before this game (0 if none).
pub fn rate_result(score: u32, previous_best: u32) -> Rating {
    if score > previous_best {
        return Rating::NewHighScore;
    }
    match score {
        300.. => Rating::Legendary,
        250..=299 => Rating::Amazing,
        200..=249 => Rating::GreatGame,
        150..=199 => Rating::WellDone,
        100..=149 => Rating::GoodEffort,
        _ => Rating::KeepTrying,
    }
}
