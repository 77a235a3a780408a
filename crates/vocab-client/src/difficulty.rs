use std::fmt;

/// Score used when the difficulty statistic cannot be fetched.
pub const DEFAULT_SCORE: f64 = 0.5;

const EASY_MAX: f64 = 0.45;
const HARD_MIN: f64 = 0.69;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyClass {
    Easy,
    Medium,
    Hard,
}

impl DifficultyClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyClass::Easy => "easy",
            DifficultyClass::Medium => "medium",
            DifficultyClass::Hard => "hard",
        }
    }
}

impl fmt::Display for DifficultyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buckets a difficulty score. An unknown score renders as medium.
///
/// Both range checks are strict, so `0.45` is easy and `0.69` is hard.
pub fn classify(score: Option<f64>) -> DifficultyClass {
    match score {
        None => DifficultyClass::Medium,
        Some(s) if s > EASY_MAX && s < HARD_MIN => DifficultyClass::Medium,
        Some(s) if s <= EASY_MAX => DifficultyClass::Easy,
        Some(_) => DifficultyClass::Hard,
    }
}
