pub mod braille;
pub mod presenter;
pub mod render;
pub mod surface;

pub use presenter::Theme;
pub use render::render;
