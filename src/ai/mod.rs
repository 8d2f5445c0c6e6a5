// AI module for the computer opponent

mod bot;
mod tracking_bot;

pub use bot::Bot;
pub use tracking_bot::TrackingBot;

use crate::config::AIConfig;

/// Difficulty tier of the computer opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    /// Slow paddle, sloppy aim
    Low,
    #[default]
    Medium,
    /// Fast paddle, tight aim
    High,
}

impl Difficulty {
    /// Value stored in the settings file
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Low => "Low",
            Difficulty::Medium => "Medium",
            Difficulty::High => "High",
        }
    }

    /// Parse a stored value. Accepts the older easy/hard spellings too.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "easy" => Some(Difficulty::Low),
            "medium" | "med" => Some(Difficulty::Medium),
            "high" | "hard" => Some(Difficulty::High),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Low, Difficulty::Medium, Difficulty::High]
    }

    /// Next tier, wrapping from High back to Low
    pub fn next(&self) -> Difficulty {
        match self {
            Difficulty::Low => Difficulty::Medium,
            Difficulty::Medium => Difficulty::High,
            Difficulty::High => Difficulty::Low,
        }
    }

    /// Previous tier, wrapping from Low to High
    pub fn previous(&self) -> Difficulty {
        match self {
            Difficulty::Low => Difficulty::High,
            Difficulty::Medium => Difficulty::Low,
            Difficulty::High => Difficulty::Medium,
        }
    }
}

/// Create a bot for the given tier using the configured tuning
pub fn create_bot(difficulty: Difficulty, ai: &AIConfig) -> Box<dyn Bot> {
    Box::new(TrackingBot::new(difficulty, ai.tier(difficulty)))
}
