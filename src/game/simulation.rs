use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::input::InputSnapshot;
use super::physics::{self, PhysicsEvents};
use super::resolver;
use super::state::GameState;
use crate::ai::{self, Bot};
use crate::audio::{self, Tone};
use crate::config::{AIConfig, AiSettings, PhysicsConfig};

/// Owns everything one match needs and advances it a tick at a time
pub struct Simulation {
    pub state: GameState,
    ai_config: AIConfig,
    bot: Option<Box<dyn Bot>>,
    rng: StdRng,
    tones: Vec<Tone>,
}

impl Simulation {
    pub fn new(field_width: f32, field_height: f32, physics: &PhysicsConfig, ai_config: &AIConfig) -> Self {
        Self::with_rng(field_width, field_height, physics, ai_config, StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn with_seed(field_width: f32, field_height: f32, physics: &PhysicsConfig, ai_config: &AIConfig, seed: u64) -> Self {
        Self::with_rng(field_width, field_height, physics, ai_config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(field_width: f32, field_height: f32, physics: &PhysicsConfig, ai_config: &AIConfig, mut rng: StdRng) -> Self {
        let state = GameState::new(field_width, field_height, physics, &mut rng);
        Self {
            state,
            ai_config: ai_config.clone(),
            bot: None,
            rng,
            tones: Vec::new(),
        }
    }

    /// Hand the right paddle to a bot, or back to its keys
    pub fn set_ai(&mut self, settings: AiSettings) {
        self.bot = settings
            .enabled
            .then(|| ai::create_bot(settings.difficulty, &self.ai_config));
        match self.bot.as_deref() {
            Some(bot) => info!(bot = bot.name(), "computer plays the right paddle"),
            None => info!("right paddle follows its keys"),
        }
    }

    #[cfg(test)]
    pub fn bot_name(&self) -> Option<&str> {
        self.bot.as_deref().map(|b| b.name())
    }

    /// Pause/resume while playing, restart after game over
    pub fn confirm(&mut self) {
        if self.state.game_over {
            debug!("restarting match");
            self.state.restart(&mut self.rng);
        } else {
            self.state.toggle_pause();
        }
    }

    /// Advance one tick: resolve paddle intent, step physics, queue sound cues.
    pub fn tick(&mut self, input: &InputSnapshot) -> PhysicsEvents {
        if input.confirm {
            self.confirm();
        }

        self.state.count_down_serve();
        if self.state.paused {
            return PhysicsEvents::default();
        }

        let intent = resolver::resolve(input, &self.state, self.bot.as_deref_mut(), &mut self.rng);
        let events = physics::step(&mut self.state, intent, &mut self.rng);
        self.tones.extend(audio::cues_for(&events));
        events
    }

    /// Take the tones queued since the last drain
    pub fn drain_tones(&mut self) -> std::vec::Drain<'_, Tone> {
        self.tones.drain(..)
    }

    pub fn resize(&mut self, field_width: f32, field_height: f32) {
        if field_width != self.state.field_width || field_height != self.state.field_height {
            debug!(field_width, field_height, "playfield resized");
            self.state.resize(field_width, field_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::audio::{HIT, SCORE};
    use crate::game::state::Phase;
    use crate::game::Player;

    fn sim() -> Simulation {
        Simulation::with_seed(800.0, 400.0, &PhysicsConfig::default(), &AIConfig::default(), 99)
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    #[test]
    fn test_serve_delay_freezes_positions() {
        let mut sim = sim();
        let ball = sim.state.ball.clone();
        let paddle = sim.state.left_paddle.clone();
        let held = InputSnapshot {
            left_down: true,
            ..idle()
        };

        for expected in (1..60).rev() {
            sim.tick(&held);
            assert_eq!(sim.state.serve_timer, expected);
            assert_eq!(sim.state.ball, ball);
            assert_eq!(sim.state.left_paddle, paddle);
        }

        // The 60th tick ends the delay and play starts in the same tick
        sim.tick(&held);
        assert_eq!(sim.state.phase(), Phase::Playing);
        assert_ne!(sim.state.ball.x, ball.x);
        assert_eq!(sim.state.left_paddle.y, paddle.y + 6.0);
    }

    #[test]
    fn test_confirm_toggles_pause_during_play() {
        let mut sim = sim();
        sim.state.serve_timer = 0;
        sim.state.paused = false;
        let press = InputSnapshot {
            confirm: true,
            ..idle()
        };

        sim.tick(&press);
        assert_eq!(sim.state.phase(), Phase::Paused);
        let frozen = sim.state.ball.clone();
        for _ in 0..10 {
            sim.tick(&idle());
        }
        assert_eq!(sim.state.ball, frozen);

        sim.tick(&press);
        assert_eq!(sim.state.phase(), Phase::Playing);
    }

    #[test]
    fn test_paddle_hit_queues_hit_tone() {
        let mut sim = sim();
        sim.state.serve_timer = 0;
        sim.state.paused = false;
        sim.state.left_paddle.y = 100.0;
        sim.state.ball.x = 30.0;
        sim.state.ball.y = 140.0;
        sim.state.ball.vx = -5.0;
        sim.state.ball.vy = 0.0;

        let events = sim.tick(&idle());

        assert_eq!(events.paddle_hit, Some(Player::Left));
        assert_eq!(sim.drain_tones().collect::<Vec<_>>(), vec![HIT]);
        assert_eq!(sim.drain_tones().count(), 0);
    }

    #[test]
    fn test_win_then_restart() {
        let mut sim = sim();
        sim.state.serve_timer = 0;
        sim.state.paused = false;
        sim.state.right_score = 9;
        sim.state.left_score = 4;
        sim.state.left_paddle.y = 0.0;
        sim.state.ball.x = 3.0;
        sim.state.ball.y = 300.0;
        sim.state.ball.vx = -5.0;
        sim.state.ball.vy = 0.0;

        let events = sim.tick(&idle());

        assert_eq!(events.winner, Some(Player::Right));
        assert!(sim.state.game_over && sim.state.paused);
        assert_eq!((sim.state.ball.vx, sim.state.ball.vy), (0.0, 0.0));
        let tones: Vec<Tone> = sim.drain_tones().collect();
        assert_eq!(tones[0], SCORE);
        assert_eq!(tones.len(), 6);

        // Game over holds until confirmed
        for _ in 0..100 {
            sim.tick(&idle());
        }
        assert_eq!(sim.state.phase(), Phase::GameOver);

        sim.tick(&InputSnapshot {
            confirm: true,
            ..idle()
        });
        assert_eq!((sim.state.left_score, sim.state.right_score), (0, 0));
        assert!(!sim.state.game_over);
        assert_eq!(sim.state.winner, None);
        assert_eq!(sim.state.phase(), Phase::Serving);
    }

    #[test]
    fn test_ai_drives_right_paddle() {
        let mut sim = sim();
        sim.set_ai(AiSettings {
            enabled: true,
            difficulty: Difficulty::High,
        });
        assert_eq!(sim.bot_name(), Some("High"));
        sim.state.serve_timer = 0;
        sim.state.paused = false;
        sim.state.right_paddle.y = 0.0;
        sim.state.ball.y = 350.0;
        sim.state.ball.vy = 0.0;

        sim.tick(&InputSnapshot {
            right_up: true,
            ..idle()
        });

        assert_eq!(sim.state.right_paddle.y, 7.0);

        sim.set_ai(AiSettings::default());
        assert_eq!(sim.bot_name(), None);
    }

    #[test]
    fn test_resize_twice_matches_once() {
        let mut sim = sim();
        sim.state.right_paddle.y = 300.0;
        sim.resize(500.0, 320.0);
        let once = sim.state.right_paddle.clone();
        sim.resize(500.0, 320.0);
        assert_eq!(sim.state.right_paddle, once);
        assert_eq!(once.y, 230.0);
        assert_eq!(once.x, 478.0);
    }
}
