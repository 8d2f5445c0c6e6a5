use rand::Rng;
use tracing::debug;

use super::state::{Ball, GameState, Paddle, Player};

/// Vertical displacement to apply to each paddle this tick
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PaddleIntent {
    pub left: f32,
    pub right: f32,
}

/// What happened during one physics step
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PhysicsEvents {
    pub wall_bounce: bool,
    pub paddle_hit: Option<Player>,
    pub point: Option<Player>,
    pub winner: Option<Player>,
}

/// Advance an unpaused match by one tick. Does nothing while paused.
pub fn step(state: &mut GameState, intent: PaddleIntent, rng: &mut impl Rng) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();
    if state.paused {
        return events;
    }

    move_paddle(&mut state.left_paddle, intent.left, state.field_height);
    move_paddle(&mut state.right_paddle, intent.right, state.field_height);

    state.ball.x += state.ball.vx;
    state.ball.y += state.ball.vy;

    events.wall_bounce = bounce_off_walls(&mut state.ball, state.field_height);

    let hit_speedup = state.physics.hit_speedup;
    let spin_factor = state.physics.spin_factor;
    if hits_left_paddle(&state.ball, &state.left_paddle) {
        state.ball.x = state.left_paddle.x + state.left_paddle.width + state.ball.radius;
        bounce_off_paddle(&mut state.ball, &state.left_paddle, hit_speedup, spin_factor);
        events.paddle_hit = Some(Player::Left);
    }
    if hits_right_paddle(&state.ball, &state.right_paddle) {
        state.ball.x = state.right_paddle.x - state.ball.radius;
        bounce_off_paddle(&mut state.ball, &state.right_paddle, hit_speedup, spin_factor);
        events.paddle_hit = Some(Player::Right);
    }

    // Out once the center leaves the playfield
    let scorer = if state.ball.x < 0.0 {
        Some(Player::Right)
    } else if state.ball.x > state.field_width {
        Some(Player::Left)
    } else {
        None
    };

    if let Some(scorer) = scorer {
        award_point(state, scorer, rng, &mut events);
    }

    events
}

fn move_paddle(paddle: &mut Paddle, displacement: f32, field_height: f32) {
    paddle.y += displacement;
    paddle.clamp_to(field_height);
}

fn bounce_off_walls(ball: &mut Ball, field_height: f32) -> bool {
    if ball.y - ball.radius < 0.0 {
        ball.y = ball.radius;
        ball.vy = -ball.vy;
        true
    } else if ball.y + ball.radius > field_height {
        ball.y = field_height - ball.radius;
        ball.vy = -ball.vy;
        true
    } else {
        false
    }
}

fn within_span(ball: &Ball, paddle: &Paddle) -> bool {
    ball.y > paddle.y && ball.y < paddle.y + paddle.height
}

// Leading edge inside the paddle's band while the center is still outside of it
fn hits_left_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let edge = ball.x - ball.radius;
    edge < paddle.x + paddle.width && edge > paddle.x && within_span(ball, paddle)
}

fn hits_right_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let edge = ball.x + ball.radius;
    edge > paddle.x && edge < paddle.x + paddle.width && within_span(ball, paddle)
}

fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, hit_speedup: f32, spin_factor: f32) {
    ball.vx *= -hit_speedup;
    ball.vy += (ball.y - paddle.center_y()) * spin_factor;
}

fn award_point(state: &mut GameState, scorer: Player, rng: &mut impl Rng, events: &mut PhysicsEvents) {
    match scorer {
        Player::Left => state.left_score += 1,
        Player::Right => state.right_score += 1,
    }
    events.point = Some(scorer);
    debug!(
        ?scorer,
        left = state.left_score,
        right = state.right_score,
        "point scored"
    );

    if state.score(scorer) >= state.physics.winning_score {
        state.end_game(scorer);
        events.winner = Some(scorer);
    } else {
        state.reset_ball(scorer.opponent(), rng);
    }
}
