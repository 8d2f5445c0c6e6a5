// Tickpong configuration types
// All settings default to the classic tuning of the game

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub ai: AIConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left paddle (always human)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Right paddle (human when the computer opponent is off)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Pause during play, restart after game over
    pub confirm: String,

    // Leave the match and return to the menu
    pub quit: String,

    // Menu controls
    pub menu_up: String,
    pub menu_down: String,
    pub menu_select: String,
    pub menu_back: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "Up".to_string(),
            right_paddle_down: "Down".to_string(),
            confirm: "Space".to_string(),
            quit: "Q".to_string(),
            menu_up: "Up".to_string(),
            menu_down: "Down".to_string(),
            menu_select: "Enter".to_string(),
            menu_back: "Esc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // Paddle geometry and speed (units per tick)
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_margin: f32,

    pub ball_radius: f32,

    // Horizontal serve speed, vertical serve speed is uniform in [-spread, spread)
    pub serve_speed: f32,
    pub serve_spread: f32,

    // Horizontal speed multiplier on every paddle hit (1.05 = 5% per hit)
    pub hit_speedup: f32,

    // Vertical velocity added per unit of offset from the paddle center
    pub spin_factor: f32,

    // Ticks the ball waits at center after a point
    pub serve_delay_ticks: u32,

    pub winning_score: u32,

    // Playfield limits when adapting to the terminal size
    pub max_field_width: f32,
    pub min_field_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            paddle_width: 12.0,
            paddle_height: 90.0,
            paddle_speed: 6.0,
            paddle_margin: 10.0,
            ball_radius: 8.0,
            serve_speed: 5.0,
            serve_spread: 2.0,
            hit_speedup: 1.05,
            spin_factor: 0.03,
            serve_delay_ticks: 60,
            winning_score: 10,
            max_field_width: 900.0,
            min_field_height: 300.0,
        }
    }
}

/// Tracking parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AiTier {
    // Largest per-tick paddle displacement
    pub max_speed: f32,

    // Width of the uniform aim error around the ball
    pub jitter: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AIConfig {
    pub low: AiTier,
    pub medium: AiTier,
    pub high: AiTier,
}

impl AiTier {
    /// Keep a tier only if both values are finite and non-negative
    fn or_default(self, fallback: AiTier) -> AiTier {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if valid(self.max_speed) && valid(self.jitter) {
            self
        } else {
            tracing::warn!(?self, "invalid AI tier, using {:?}", fallback);
            fallback
        }
    }
}

impl AIConfig {
    /// Replace tiers a hand-edited config made unusable with their defaults
    pub fn validated(self) -> Self {
        let defaults = AIConfig::default();
        Self {
            low: self.low.or_default(defaults.low),
            medium: self.medium.or_default(defaults.medium),
            high: self.high.or_default(defaults.high),
        }
    }

    pub fn tier(&self, difficulty: Difficulty) -> AiTier {
        match difficulty {
            Difficulty::Low => self.low,
            Difficulty::Medium => self.medium,
            Difficulty::High => self.high,
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            low: AiTier {
                max_speed: 2.5,
                jitter: 30.0,
            },
            medium: AiTier {
                max_speed: 4.0,
                jitter: 14.0,
            },
            high: AiTier {
                max_speed: 7.0,
                jitter: 6.0,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second (one simulation tick per frame)
    pub target_fps: u64,

    // Paddle, ball and text color (RGB values 0-255)
    pub foreground_color: [u8; 3],

    // Dashed center line color
    pub divider_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            foreground_color: [255, 255, 255],
            divider_color: [34, 34, 34],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,

    // Master volume applied on top of every cue (0.0 - 1.0)
    pub master_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            master_volume: 1.0,
        }
    }
}
