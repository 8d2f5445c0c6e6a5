// Draws one frame of the match onto a Surface. Reads the state, never changes it.

use super::surface::{Paint, Region, Surface, TextAlign};
use crate::config::{DisplayConfig, KeyBindings};
use crate::game::{GameState, Player};

const DASH_LENGTH: f32 = 12.0;
const DASH_SPACING: f32 = 20.0;
const DASH_WIDTH: f32 = 2.0;
const SCORE_SIZE: f32 = 36.0;
const SCORE_BASELINE: f32 = 50.0;
const BANNER_SIZE: f32 = 48.0;
const HINT_SIZE: f32 = 20.0;
const DIM_ALPHA: f32 = 0.6;

/// Colors and labels the presenter needs from the configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub foreground: [u8; 3],
    pub divider: [u8; 3],
    /// Name of the pause/restart key as shown to the player
    pub confirm_key: String,
}

impl Theme {
    pub fn new(display: &DisplayConfig, bindings: &KeyBindings) -> Self {
        Self {
            foreground: display.foreground_color,
            divider: display.divider_color,
            confirm_key: bindings.confirm.clone(),
        }
    }
}

/// Message drawn over the field, at most one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Paused,
    GameOver(Option<Player>),
}

pub fn overlay_for(state: &GameState) -> Overlay {
    if state.game_over {
        Overlay::GameOver(state.winner)
    } else if state.paused && state.serve_timer == 0 {
        // A serve delay also pauses, but only a manual pause gets the hint
        Overlay::Paused
    } else {
        Overlay::None
    }
}

pub fn present(surface: &mut impl Surface, state: &GameState, theme: &Theme) {
    let (width, height) = surface.size();
    let fg = Paint::solid(theme.foreground);

    surface.clear(Region::new(0.0, 0.0, width, height));

    let mut y = 0.0;
    while y < height {
        surface.fill_rect(
            Region::new(width / 2.0 - DASH_WIDTH / 2.0, y, DASH_WIDTH, DASH_LENGTH),
            Paint::solid(theme.divider),
        );
        y += DASH_SPACING;
    }

    for paddle in [&state.left_paddle, &state.right_paddle] {
        surface.fill_rect(Region::new(paddle.x, paddle.y, paddle.width, paddle.height), fg);
    }

    surface.fill_circle(state.ball.x, state.ball.y, state.ball.radius, fg);

    surface.fill_text(
        &state.left_score.to_string(),
        width * 0.25,
        SCORE_BASELINE,
        TextAlign::Center,
        SCORE_SIZE,
        fg,
    );
    surface.fill_text(
        &state.right_score.to_string(),
        width * 0.75,
        SCORE_BASELINE,
        TextAlign::Center,
        SCORE_SIZE,
        fg,
    );

    match overlay_for(state) {
        Overlay::GameOver(winner) => {
            surface.fill_rect(
                Region::new(0.0, 0.0, width, height),
                Paint::translucent([0, 0, 0], DIM_ALPHA),
            );
            let name = winner.map(|w| w.display_name()).unwrap_or("Player");
            surface.fill_text(
                &format!("{} Wins!", name),
                width / 2.0,
                height / 2.0 - 10.0,
                TextAlign::Center,
                BANNER_SIZE,
                fg,
            );
            surface.fill_text(
                &format!("Press {} to restart", theme.confirm_key),
                width / 2.0,
                height / 2.0 + 30.0,
                TextAlign::Center,
                HINT_SIZE,
                fg,
            );
        }
        Overlay::Paused => {
            surface.fill_text(
                &format!("Paused - press {}", theme.confirm_key),
                width / 2.0,
                height - 30.0,
                TextAlign::Center,
                HINT_SIZE,
                fg,
            );
        }
        Overlay::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhysicsConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear(Region),
        Rect(Region, Paint),
        Circle(f32, f32, f32),
        Text(String, TextAlign),
    }

    /// Test double that records every draw call
    struct Recording {
        size: (f32, f32),
        calls: Vec<Call>,
    }

    impl Recording {
        fn new(width: f32, height: f32) -> Self {
            Self {
                size: (width, height),
                calls: Vec::new(),
            }
        }

        fn texts(&self) -> Vec<String> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(t, _) => Some(t.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recording {
        fn size(&self) -> (f32, f32) {
            self.size
        }
        fn clear(&mut self, region: Region) {
            self.calls.push(Call::Clear(region));
        }
        fn fill_rect(&mut self, region: Region, paint: Paint) {
            self.calls.push(Call::Rect(region, paint));
        }
        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, _paint: Paint) {
            self.calls.push(Call::Circle(cx, cy, radius));
        }
        fn fill_text(&mut self, text: &str, _x: f32, _y: f32, align: TextAlign, _size: f32, _paint: Paint) {
            self.calls.push(Call::Text(text.to_string(), align));
        }
    }

    fn theme() -> Theme {
        Theme::new(&DisplayConfig::default(), &KeyBindings::default())
    }

    fn state() -> GameState {
        let mut rng = StdRng::seed_from_u64(5);
        GameState::new(800.0, 400.0, &PhysicsConfig::default(), &mut rng)
    }

    #[test]
    fn test_frame_layout_while_serving() {
        let mut state = state();
        state.left_score = 3;
        state.right_score = 7;
        let mut surface = Recording::new(800.0, 400.0);

        present(&mut surface, &state, &theme());

        assert_eq!(surface.calls[0], Call::Clear(Region::new(0.0, 0.0, 800.0, 400.0)));
        // 20 dashes for a 400 tall field, then two paddles
        let rects = surface
            .calls
            .iter()
            .filter(|c| matches!(c, Call::Rect(..)))
            .count();
        assert_eq!(rects, 22);
        assert!(surface.calls.contains(&Call::Circle(400.0, 200.0, 8.0)));
        // Serving is not a manual pause: no overlay text
        assert_eq!(surface.texts(), vec!["3", "7"]);
    }

    #[test]
    fn test_manual_pause_shows_hint() {
        let mut state = state();
        state.serve_timer = 0;
        state.paused = true;
        let mut surface = Recording::new(800.0, 400.0);

        present(&mut surface, &state, &theme());

        assert_eq!(overlay_for(&state), Overlay::Paused);
        assert_eq!(surface.texts().last().unwrap(), "Paused - press Space");
    }

    #[test]
    fn test_game_over_dims_and_names_winner() {
        let mut state = state();
        state.right_score = 10;
        state.end_game(Player::Right);
        let mut surface = Recording::new(800.0, 400.0);

        present(&mut surface, &state, &theme());

        assert!(surface.calls.contains(&Call::Rect(
            Region::new(0.0, 0.0, 800.0, 400.0),
            Paint::translucent([0, 0, 0], 0.6)
        )));
        let texts = surface.texts();
        assert!(texts.contains(&"Right Player Wins!".to_string()));
        assert!(texts.contains(&"Press Space to restart".to_string()));
        assert!(!texts.iter().any(|t| t.starts_with("Paused")));
    }

    #[test]
    fn test_presenter_does_not_mutate() {
        let state = state();
        let before = format!("{:?}", state);
        let mut surface = Recording::new(800.0, 400.0);

        present(&mut surface, &state, &theme());

        assert_eq!(format!("{:?}", state), before);
    }
}
