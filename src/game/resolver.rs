// Turns held keys, or the bot, into paddle displacements for one tick

use rand::RngCore;

use super::input::InputSnapshot;
use super::physics::PaddleIntent;
use super::state::{GameState, Paddle};
use crate::ai::Bot;

fn human(paddle: &Paddle, up: bool, down: bool) -> f32 {
    match (up, down) {
        (true, false) => -paddle.speed,
        (false, true) => paddle.speed,
        // Neither, or both cancelling out
        _ => 0.0,
    }
}

/// The left paddle always follows its keys; the right one follows the bot when there is one.
pub fn resolve(
    input: &InputSnapshot,
    state: &GameState,
    bot: Option<&mut (dyn Bot + '_)>,
    rng: &mut dyn RngCore,
) -> PaddleIntent {
    let left = human(&state.left_paddle, input.left_up, input.left_down);
    let right = match bot {
        Some(bot) => bot.displacement(state, rng),
        None => human(&state.right_paddle, input.right_up, input.right_down),
    };
    PaddleIntent { left, right }
}
