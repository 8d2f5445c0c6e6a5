// Bot trait for the computer opponent

use rand::RngCore;

use crate::game::GameState;

/// Trait for AI paddle controllers
///
/// A bot drives the right paddle. Each unpaused tick it looks at the game state and
/// answers with the vertical displacement it wants; the physics step applies it and
/// keeps the paddle inside the playfield.
pub trait Bot {
    /// Decide how far to move the right paddle this tick
    ///
    /// # Arguments
    /// * `game_state` - Current game state (ball position, paddles, scores, etc.)
    /// * `rng` - Source of the aim jitter
    fn displacement(&mut self, game_state: &GameState, rng: &mut dyn RngCore) -> f32;

    /// Bot name for debugging/display
    fn name(&self) -> &str;
}
