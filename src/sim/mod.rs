//! Player simulation: input state and viewpoint movement.

mod controls;
mod player;

pub use controls::ControlState;
pub use player::Player;
