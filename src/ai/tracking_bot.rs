// Tracking bot: chases the ball's height with a speed cap and imperfect aim

use rand::{Rng, RngCore};

use super::{Bot, Difficulty};
use crate::config::AiTier;
use crate::game::GameState;

pub struct TrackingBot {
    name: String,
    tier: AiTier,
}

impl TrackingBot {
    pub fn new(difficulty: Difficulty, tier: AiTier) -> Self {
        Self {
            name: difficulty.display_name().to_string(),
            tier,
        }
    }

    /// Where the top of the paddle should go to center it on the ball, before jitter
    fn aim(&self, game_state: &GameState) -> f32 {
        game_state.ball.y - game_state.right_paddle.height / 2.0
    }
}

impl Bot for TrackingBot {
    fn displacement(&mut self, game_state: &GameState, rng: &mut dyn RngCore) -> f32 {
        let jitter = (rng.gen::<f32>() - 0.5) * self.tier.jitter;
        let target = self.aim(game_state) + jitter;
        let delta = target - game_state.right_paddle.y;
        // A broken tier must not panic in clamp
        let cap = if self.tier.max_speed.is_finite() {
            self.tier.max_speed.abs()
        } else {
            0.0
        };
        let delta = delta.clamp(-cap, cap);
        if delta.is_finite() {
            delta
        } else {
            0.0
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
