mod planes;
mod renderer;
mod sky;
mod sprites;
mod walls;

pub use renderer::{DEFAULT_LIGHT_RANGE, DEFAULT_MAX_RANGE, Software};
