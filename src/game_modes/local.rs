use std::io;
use std::time::Instant;

use ratatui::Terminal;
use tracing::info;

use crate::audio::AudioSink;
use crate::config::{AiSettings, Config};
use crate::game::{field_size_for_terminal, KeyTracker, Keymap, Simulation};
use crate::ui::{self, Theme};

use super::common::{frame_duration, limit_frame_rate};

/// Footer text listing the keys for the current controller setup
pub fn controls_hint(config: &Config, ai: AiSettings) -> String {
    let kb = &config.keybindings;
    let right = if ai.enabled {
        format!("Computer ({})", ai.difficulty.display_name())
    } else {
        format!("{}/{}", kb.right_paddle_up, kb.right_paddle_down)
    };
    format!(
        "Left {}/{}  Right {}  {}: pause  {}: menu",
        kb.left_paddle_up, kb.left_paddle_down, right, kb.confirm, kb.quit
    )
}

/// Run one match until the quit key. Returns to the caller (the menu) afterwards.
pub fn run_game_local<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    ai: AiSettings,
    audio: &mut dyn AudioSink,
    exact_releases: bool,
) -> Result<(), io::Error> {
    info!(ai = ai.enabled, difficulty = ai.difficulty.as_str(), "match started");

    let frame = frame_duration(config.display.target_fps);
    let theme = Theme::new(&config.display, &config.keybindings);
    let hint = controls_hint(config, ai);
    let mut keys = KeyTracker::new(Keymap::from_bindings(&config.keybindings), exact_releases);

    let size = terminal.size()?;
    let (width, height) = field_size_for_terminal(size.width, size.height, &config.physics);
    let mut sim = Simulation::new(width, height, &config.physics, &config.ai);
    sim.set_ai(ai);

    loop {
        let now = Instant::now();

        // Check for terminal resize
        let size = terminal.size()?;
        let (width, height) = field_size_for_terminal(size.width, size.height, &config.physics);
        sim.resize(width, height);

        let input = keys.poll()?;
        if input.quit {
            info!(
                left = sim.state.left_score,
                right = sim.state.right_score,
                "match left"
            );
            return Ok(());
        }

        let events = sim.tick(&input);
        if let Some(winner) = events.winner {
            info!(?winner, "match won");
        }
        for tone in sim.drain_tones() {
            audio.play(tone);
        }

        terminal.draw(|f| ui::render(f, &sim.state, &theme, &hint))?;

        // Frame rate limiting
        limit_frame_rate(now, frame);
    }
}
