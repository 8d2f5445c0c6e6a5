use rand::Rng;

use crate::config::PhysicsConfig;

// Terminal cells are mapped onto playfield units: 2×4 Braille dots per cell, 4 units per dot
pub const UNITS_PER_CELL_X: f32 = 8.0;
pub const UNITS_PER_CELL_Y: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            radius,
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keep the paddle fully inside a playfield of the given height
    pub fn clamp_to(&mut self, field_height: f32) {
        self.y = self.y.max(0.0).min(field_height - self.height);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Player {
    Left,
    Right,
}

impl Player {
    pub fn display_name(&self) -> &'static str {
        match self {
            Player::Left => "Left Player",
            Player::Right => "Right Player",
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::Left => Player::Right,
            Player::Right => Player::Left,
        }
    }

    /// Horizontal direction that points toward this player's side
    pub fn direction(&self) -> f32 {
        match self {
            Player::Left => -1.0,
            Player::Right => 1.0,
        }
    }
}

/// Where the match currently stands, derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ball waiting at center after a reset
    Serving,
    Playing,
    /// Paused by the player
    Paused,
    /// Terminal until restarted
    GameOver,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub left_score: u32,
    pub right_score: u32,
    pub paused: bool,
    pub serve_timer: u32,
    pub game_over: bool,
    pub winner: Option<Player>,
    pub field_width: f32,
    pub field_height: f32,
    pub physics: PhysicsConfig,
}

impl GameState {
    /// Build a fresh match in the serving state, ball headed to a random side.
    pub fn new(field_width: f32, field_height: f32, physics: &PhysicsConfig, rng: &mut impl Rng) -> Self {
        let paddle = |x: f32| Paddle {
            x,
            y: 100.0,
            width: physics.paddle_width,
            height: physics.paddle_height,
            speed: physics.paddle_speed,
        };

        let mut state = Self {
            ball: Ball::new(field_width / 2.0, field_height / 2.0, physics.ball_radius),
            left_paddle: paddle(physics.paddle_margin),
            right_paddle: paddle(field_width - physics.paddle_margin - physics.paddle_width),
            left_score: 0,
            right_score: 0,
            paused: false,
            serve_timer: 0,
            game_over: false,
            winner: None,
            field_width,
            field_height,
            physics: physics.clone(),
        };
        state.left_paddle.clamp_to(field_height);
        state.right_paddle.clamp_to(field_height);

        let toward = random_side(rng);
        state.reset_ball(toward, rng);
        state
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.serve_timer > 0 {
            Phase::Serving
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::Left => self.left_score,
            Player::Right => self.right_score,
        }
    }

    /// Recenter the ball heading toward `toward` and start the serve delay.
    pub fn reset_ball(&mut self, toward: Player, rng: &mut impl Rng) {
        let spread = self.physics.serve_spread;
        self.ball.x = self.field_width / 2.0;
        self.ball.y = self.field_height / 2.0;
        self.ball.vx = toward.direction() * self.physics.serve_speed;
        self.ball.vy = if spread > 0.0 {
            rng.gen_range(-spread..spread)
        } else {
            0.0
        };
        self.paused = true;
        self.serve_timer = self.physics.serve_delay_ticks;
    }

    /// Count the serve delay down; play resumes on the tick it reaches zero.
    pub fn count_down_serve(&mut self) {
        if self.serve_timer > 0 {
            self.serve_timer -= 1;
            if self.serve_timer == 0 && !self.game_over {
                self.paused = false;
            }
        }
    }

    /// Flip between playing and paused. Ignored while serving or after game over.
    pub fn toggle_pause(&mut self) {
        match self.phase() {
            Phase::Playing => self.paused = true,
            Phase::Paused => self.paused = false,
            Phase::Serving | Phase::GameOver => {}
        }
    }

    /// Finish the match in favour of `winner`
    pub fn end_game(&mut self, winner: Player) {
        self.winner = Some(winner);
        self.game_over = true;
        self.paused = true;
        self.serve_timer = 0;
        self.ball.stop();
    }

    /// Reset the entire game for a rematch (scores, game_over, winner, ball)
    pub fn restart(&mut self, rng: &mut impl Rng) {
        self.left_score = 0;
        self.right_score = 0;
        self.game_over = false;
        self.winner = None;
        let toward = random_side(rng);
        self.reset_ball(toward, rng);
    }

    /// Adapt to a new drawable size: re-clamp paddles and move the right paddle to the edge.
    pub fn resize(&mut self, field_width: f32, field_height: f32) {
        self.field_width = field_width;
        self.field_height = field_height;
        self.right_paddle.x = field_width - self.physics.paddle_margin - self.right_paddle.width;
        self.left_paddle.clamp_to(field_height);
        self.right_paddle.clamp_to(field_height);

        let r = self.ball.radius;
        self.ball.x = self.ball.x.max(r).min(field_width - r);
        self.ball.y = self.ball.y.max(r).min(field_height - r);
    }
}

/// Playfield size for a terminal of `cols` × `rows` cells (one row is kept for the hint bar)
pub fn field_size_for_terminal(cols: u16, rows: u16, physics: &PhysicsConfig) -> (f32, f32) {
    let width = (cols as f32 * UNITS_PER_CELL_X).min(physics.max_field_width);
    let height = (rows.saturating_sub(1) as f32 * UNITS_PER_CELL_Y).max(physics.min_field_height);
    (width, height)
}

fn random_side(rng: &mut impl Rng) -> Player {
    if rng.gen_bool(0.5) {
        Player::Right
    } else {
        Player::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn new_state() -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(7);
        let state = GameState::new(800.0, 400.0, &PhysicsConfig::default(), &mut rng);
        (state, rng)
    }

    #[test]
    fn test_starts_serving_from_center() {
        let (state, _) = new_state();
        assert_eq!(state.phase(), Phase::Serving);
        assert!(state.paused);
        assert_eq!(state.serve_timer, 60);
        assert_eq!(state.ball.x, 400.0);
        assert_eq!(state.ball.y, 200.0);
        assert_eq!(state.ball.vx.abs(), 5.0);
        assert!(state.ball.vy >= -2.0 && state.ball.vy < 2.0);
        assert_eq!(state.right_paddle.x, 800.0 - 10.0 - 12.0);
    }

    #[test]
    fn test_serve_countdown_unpauses() {
        let (mut state, _) = new_state();
        for _ in 0..59 {
            state.count_down_serve();
        }
        assert_eq!(state.phase(), Phase::Serving);
        state.count_down_serve();
        assert_eq!(state.serve_timer, 0);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_toggle_pause_only_while_playing_or_paused() {
        let (mut state, _) = new_state();
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Serving, "serve delay cannot be skipped");

        state.serve_timer = 1;
        state.count_down_serve();
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Paused);
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::Playing);

        state.end_game(Player::Left);
        state.toggle_pause();
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_reset_ball_serves_toward_given_side() {
        let (mut state, mut rng) = new_state();
        state.reset_ball(Player::Left, &mut rng);
        assert!(state.ball.vx < 0.0);
        state.reset_ball(Player::Right, &mut rng);
        assert!(state.ball.vx > 0.0);
    }

    #[test]
    fn test_restart_clears_match() {
        let (mut state, mut rng) = new_state();
        state.right_score = 10;
        state.left_score = 4;
        state.end_game(Player::Right);

        state.restart(&mut rng);

        assert_eq!(state.left_score, 0);
        assert_eq!(state.right_score, 0);
        assert!(!state.game_over);
        assert_eq!(state.winner, None);
        assert_eq!(state.phase(), Phase::Serving);
        assert_eq!(state.ball.vx.abs(), 5.0);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let (mut state, _) = new_state();
        state.left_paddle.y = 350.0;
        state.right_paddle.y = 20.0;

        state.resize(600.0, 300.0);
        let once = (state.left_paddle.clone(), state.right_paddle.clone());
        state.resize(600.0, 300.0);

        assert_eq!(state.left_paddle, once.0);
        assert_eq!(state.right_paddle, once.1);
        assert_eq!(state.left_paddle.y, 300.0 - 90.0);
        assert_eq!(state.right_paddle.y, 20.0);
        assert_eq!(state.right_paddle.x, 600.0 - 10.0 - 12.0);
    }

    #[test]
    fn test_shrinking_resize_keeps_ball_inside() {
        let (mut state, _) = new_state();
        state.ball.x = 700.0;
        state.ball.y = 380.0;

        state.resize(500.0, 300.0);
        let once = state.ball.clone();
        state.resize(500.0, 300.0);

        assert_eq!(state.ball, once);
        assert_eq!((once.x, once.y), (492.0, 292.0));
    }

    #[test]
    fn test_field_size_for_terminal() {
        let physics = PhysicsConfig::default();
        assert_eq!(field_size_for_terminal(80, 25, &physics), (640.0, 384.0));
        // Wide terminals cap the width, short ones keep a minimum height
        assert_eq!(field_size_for_terminal(200, 10, &physics), (900.0, 300.0));
    }
}
