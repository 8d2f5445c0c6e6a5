// Menu input handling

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Duration;
use tracing::debug;

use super::state::{MenuItem, MenuState};
use crate::config::{KeyBindings, SettingsStore};
use crate::game::input::parse_key;

/// Menu action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Continue in menu
    None,
    /// Start a match with the current settings
    StartGame,
    /// Exit application
    Quit,
}

/// Configurable menu keys. Arrow keys, Enter and Esc always work as well.
#[derive(Debug, Clone)]
pub struct MenuKeys {
    pub up: KeyCode,
    pub down: KeyCode,
    pub select: KeyCode,
    pub back: KeyCode,
    pub quit: KeyCode,
}

impl MenuKeys {
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let key = |name: &str, fallback: KeyCode| parse_key(name).unwrap_or(fallback);
        Self {
            up: key(&bindings.menu_up, KeyCode::Up),
            down: key(&bindings.menu_down, KeyCode::Down),
            select: key(&bindings.menu_select, KeyCode::Enter),
            back: key(&bindings.menu_back, KeyCode::Esc),
            quit: key(&bindings.quit, KeyCode::Char('q')),
        }
    }
}

impl Default for MenuKeys {
    fn default() -> Self {
        Self::from_bindings(&KeyBindings::default())
    }
}

/// Handle menu input and return the next action
pub fn handle_menu_input(
    menu_state: &mut MenuState,
    keys: &MenuKeys,
    store: &mut dyn SettingsStore,
) -> Result<MenuAction, io::Error> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key_press(menu_state, keys, store, key.code));
            }
        }
    }

    Ok(MenuAction::None)
}

fn lower(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

pub fn handle_key_press(
    menu_state: &mut MenuState,
    keys: &MenuKeys,
    store: &mut dyn SettingsStore,
    key_code: KeyCode,
) -> MenuAction {
    let code = lower(key_code);

    if code == lower(keys.up) || code == KeyCode::Up || code == KeyCode::Char('k') {
        menu_state.select_previous();
        return MenuAction::None;
    }
    if code == lower(keys.down) || code == KeyCode::Down || code == KeyCode::Char('j') {
        menu_state.select_next();
        return MenuAction::None;
    }
    if code == lower(keys.back) || code == lower(keys.quit) || code == KeyCode::Esc {
        return MenuAction::Quit;
    }

    match code {
        KeyCode::Left | KeyCode::Char('h') => change_setting(menu_state, store, false),
        KeyCode::Right | KeyCode::Char('l') => change_setting(menu_state, store, true),
        c if c == lower(keys.select) || c == KeyCode::Enter || c == KeyCode::Char(' ') => {
            handle_menu_selection(menu_state, store)
        }
        _ => MenuAction::None,
    }
}

fn change_setting(menu_state: &mut MenuState, store: &mut dyn SettingsStore, forward: bool) -> MenuAction {
    if menu_state.cycle_setting(forward) {
        debug!(
            enabled = menu_state.ai.enabled,
            difficulty = menu_state.ai.difficulty.as_str(),
            "AI settings changed"
        );
        menu_state.ai.save(store);
    }
    MenuAction::None
}

fn handle_menu_selection(menu_state: &mut MenuState, store: &mut dyn SettingsStore) -> MenuAction {
    match menu_state.selected_item() {
        MenuItem::Play => MenuAction::StartGame,
        item if item.is_setting() => change_setting(menu_state, store, true),
        MenuItem::Quit => MenuAction::Quit,
        _ => MenuAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::config::settings::{MemorySettings, AI_ENABLED_KEY, AI_LEVEL_KEY};
    use crate::config::AiSettings;

    fn press(menu: &mut MenuState, store: &mut MemorySettings, code: KeyCode) -> MenuAction {
        handle_key_press(menu, &MenuKeys::default(), store, code)
    }

    #[test]
    fn test_enter_on_play_starts() {
        let mut menu = MenuState::default();
        let mut store = MemorySettings(Default::default());

        assert_eq!(press(&mut menu, &mut store, KeyCode::Enter), MenuAction::StartGame);
        assert!(store.0.is_empty());
    }

    #[test]
    fn test_quit_keys() {
        let mut menu = MenuState::default();
        let mut store = MemorySettings(Default::default());

        assert_eq!(press(&mut menu, &mut store, KeyCode::Esc), MenuAction::Quit);
        assert_eq!(press(&mut menu, &mut store, KeyCode::Char('Q')), MenuAction::Quit);

        menu.select_previous();
        assert_eq!(press(&mut menu, &mut store, KeyCode::Enter), MenuAction::Quit);
    }

    #[test]
    fn test_toggling_opponent_persists() {
        let mut menu = MenuState::default();
        let mut store = MemorySettings(Default::default());

        press(&mut menu, &mut store, KeyCode::Down);
        assert_eq!(menu.selected_item(), MenuItem::Opponent);
        assert_eq!(press(&mut menu, &mut store, KeyCode::Right), MenuAction::None);

        assert!(menu.ai.enabled);
        assert_eq!(store.0.get(AI_ENABLED_KEY).map(String::as_str), Some("true"));
        assert_eq!(store.0.get(AI_LEVEL_KEY).map(String::as_str), Some("medium"));
    }

    #[test]
    fn test_difficulty_change_round_trips_through_store() {
        let mut menu = MenuState::new(AiSettings {
            enabled: true,
            difficulty: Difficulty::Medium,
        });
        let mut store = MemorySettings(Default::default());

        press(&mut menu, &mut store, KeyCode::Down);
        press(&mut menu, &mut store, KeyCode::Down);
        press(&mut menu, &mut store, KeyCode::Left);

        assert_eq!(menu.ai.difficulty, Difficulty::Low);
        assert_eq!(AiSettings::load(&store), menu.ai);
    }

    #[test]
    fn test_custom_menu_keys() {
        let bindings = KeyBindings {
            menu_down: "J".to_string(),
            menu_select: "X".to_string(),
            ..KeyBindings::default()
        };
        let keys = MenuKeys::from_bindings(&bindings);
        let mut menu = MenuState::default();
        let mut store = MemorySettings(Default::default());

        handle_key_press(&mut menu, &keys, &mut store, KeyCode::Char('j'));
        assert_eq!(menu.selected_item(), MenuItem::Opponent);
        handle_key_press(&mut menu, &keys, &mut store, KeyCode::Char('x'));
        assert!(menu.ai.enabled);
    }
}
