pub mod input;
pub mod physics;
pub mod resolver;
pub mod simulation;
pub mod state;

pub use input::{KeyTracker, Keymap};
pub use physics::PhysicsEvents;
pub use simulation::Simulation;
pub use state::{field_size_for_terminal, GameState, Player};
