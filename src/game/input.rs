use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

// Without release events a held key shows up as a press, a pause, then a stream of repeats.
// The first timeout has to outlast the OS repeat delay, later ones only the repeat interval.
const FIRST_PRESS_HOLD: Duration = Duration::from_millis(550);
const REPEAT_HOLD: Duration = Duration::from_millis(120);

/// Keys held (or pressed) during one tick, captured once and passed down
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Pause/resume, or restart after game over. Edge-triggered.
    pub confirm: bool,
    /// Leave the match. Edge-triggered.
    pub quit: bool,
}

/// Parse a key name from the config file
pub fn parse_key(name: &str) -> Option<KeyCode> {
    match name.trim().to_lowercase().as_str() {
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "space" => Some(KeyCode::Char(' ')),
        "tab" => Some(KeyCode::Tab),
        "backspace" => Some(KeyCode::Backspace),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Letters are matched case-insensitively so Shift or Caps Lock don't matter
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// The game keys resolved from the configured names
#[derive(Debug, Clone)]
pub struct Keymap {
    pub left_up: KeyCode,
    pub left_down: KeyCode,
    pub right_up: KeyCode,
    pub right_down: KeyCode,
    pub confirm: KeyCode,
    pub quit: KeyCode,
}

impl Keymap {
    /// Resolve bindings, keeping the default for any name that doesn't parse
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let defaults = KeyBindings::default();
        let resolve = |name: &str, fallback: &str| {
            parse_key(name)
                .or_else(|| {
                    tracing::warn!("unknown key name {:?}, using {:?}", name, fallback);
                    parse_key(fallback)
                })
                .unwrap_or(KeyCode::Null)
        };
        Self {
            left_up: resolve(&bindings.left_paddle_up, &defaults.left_paddle_up),
            left_down: resolve(&bindings.left_paddle_down, &defaults.left_paddle_down),
            right_up: resolve(&bindings.right_paddle_up, &defaults.right_paddle_up),
            right_down: resolve(&bindings.right_paddle_down, &defaults.right_paddle_down),
            confirm: resolve(&bindings.confirm, &defaults.confirm),
            quit: resolve(&bindings.quit, &defaults.quit),
        }
    }
}

struct Held {
    since_last_event: Instant,
    repeated: bool,
}

/// Turns the terminal's key event stream into "is key K held" state
pub struct KeyTracker {
    keymap: Keymap,
    held: HashMap<KeyCode, Held>,
    pressed: Vec<KeyCode>,
    /// Terminal reports key releases (keyboard enhancement protocol)
    exact_releases: bool,
}

impl KeyTracker {
    pub fn new(keymap: Keymap, exact_releases: bool) -> Self {
        Self {
            keymap,
            held: HashMap::new(),
            pressed: Vec::new(),
            exact_releases,
        }
    }

    /// Feed one key event observed at `now`
    pub fn apply(&mut self, key: KeyEvent, now: Instant) {
        let code = normalize(key.code);
        match key.kind {
            // Plain terminals report auto-repeat as further presses of a key still held
            KeyEventKind::Press if !self.exact_releases && self.is_held(code, now) => {
                self.held.insert(
                    code,
                    Held {
                        since_last_event: now,
                        repeated: true,
                    },
                );
            }
            KeyEventKind::Press => {
                self.pressed.push(code);
                self.held.insert(
                    code,
                    Held {
                        since_last_event: now,
                        repeated: false,
                    },
                );
            }
            KeyEventKind::Repeat => {
                self.held.insert(
                    code,
                    Held {
                        since_last_event: now,
                        repeated: true,
                    },
                );
            }
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
        }
    }

    fn is_held(&self, code: KeyCode, now: Instant) -> bool {
        let code = normalize(code);
        match self.held.get(&code) {
            None => false,
            Some(_) if self.exact_releases => true,
            Some(held) => {
                let hold = if held.repeated {
                    REPEAT_HOLD
                } else {
                    FIRST_PRESS_HOLD
                };
                now.duration_since(held.since_last_event) <= hold
            }
        }
    }

    /// Capture the state for this tick and clear the edge-triggered presses
    pub fn snapshot(&mut self, now: Instant) -> InputSnapshot {
        let km = &self.keymap;
        let snapshot = InputSnapshot {
            left_up: self.is_held(km.left_up, now),
            left_down: self.is_held(km.left_down, now),
            right_up: self.is_held(km.right_up, now),
            right_down: self.is_held(km.right_down, now),
            confirm: self.pressed.contains(&normalize(km.confirm)),
            quit: self.pressed.contains(&normalize(km.quit)),
        };
        self.pressed.clear();
        if !self.exact_releases {
            self.held
                .retain(|_, held| now.duration_since(held.since_last_event) <= FIRST_PRESS_HOLD);
        }
        snapshot
    }

    /// Drain every pending terminal event without blocking, then snapshot
    pub fn poll(&mut self) -> Result<InputSnapshot, io::Error> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                self.apply(key, Instant::now());
            }
        }
        Ok(self.snapshot(Instant::now()))
    }
}
