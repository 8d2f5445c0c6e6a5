// Menu module for Tickpong
// Handles main menu UI, navigation, and the opponent settings

pub mod input;
pub mod render;
pub mod state;

pub use input::{handle_menu_input, MenuAction, MenuKeys};
pub use render::render_menu;
pub use state::{AppState, MenuState};
