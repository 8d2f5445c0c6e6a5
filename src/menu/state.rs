// Menu state management and the top-level app state machine

use crate::config::AiSettings;

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Currently in the main menu
    Menu,
    /// Currently playing a match
    Game,
    /// Graceful shutdown
    Exiting,
}

/// Menu items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Opponent,
    Difficulty,
    Quit,
}

impl MenuItem {
    /// Get all menu items in order
    pub fn all() -> Vec<MenuItem> {
        vec![
            MenuItem::Play,
            MenuItem::Opponent,
            MenuItem::Difficulty,
            MenuItem::Quit,
        ]
    }

    /// Whether Left/Right change this item's value
    pub fn is_setting(&self) -> bool {
        matches!(self, MenuItem::Opponent | MenuItem::Difficulty)
    }
}

/// Menu state
pub struct MenuState {
    /// Currently selected menu item index
    pub selected_index: usize,
    /// All menu items
    pub items: Vec<MenuItem>,
    /// Opponent settings being edited, saved on every change
    pub ai: AiSettings,
}

impl MenuState {
    pub fn new(ai: AiSettings) -> Self {
        Self {
            selected_index: 0,
            items: MenuItem::all(),
            ai,
        }
    }

    /// Get currently selected menu item
    pub fn selected_item(&self) -> MenuItem {
        self.items[self.selected_index]
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        } else {
            self.selected_index = self.items.len() - 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_index < self.items.len() - 1 {
            self.selected_index += 1;
        } else {
            self.selected_index = 0;
        }
    }

    /// Step the selected setting forward or back. Returns true if anything changed.
    pub fn cycle_setting(&mut self, forward: bool) -> bool {
        match self.selected_item() {
            MenuItem::Opponent => {
                self.ai.enabled = !self.ai.enabled;
                true
            }
            MenuItem::Difficulty => {
                self.ai.difficulty = if forward {
                    self.ai.difficulty.next()
                } else {
                    self.ai.difficulty.previous()
                };
                true
            }
            MenuItem::Play | MenuItem::Quit => false,
        }
    }

    /// Text shown for an item, including its current value
    pub fn label(&self, item: MenuItem) -> String {
        match item {
            MenuItem::Play => "Play".to_string(),
            MenuItem::Opponent => {
                let who = if self.ai.enabled { "Computer" } else { "Human" };
                format!("Right paddle: < {} >", who)
            }
            MenuItem::Difficulty => {
                format!("AI difficulty: < {} >", self.ai.difficulty.display_name())
            }
            MenuItem::Quit => "Quit".to_string(),
        }
    }

    /// Difficulty only matters with the computer playing
    pub fn is_dimmed(&self, item: MenuItem) -> bool {
        item == MenuItem::Difficulty && !self.ai.enabled
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(AiSettings::default())
    }
}
