mod camera;
mod grid;
mod sprite;
mod texture;

pub use camera::{Camera, NEAR_EPS, Projection};
pub use grid::{EMPTY, FLOOR_CEIL, Grid, OUT_OF_BOUNDS, WALL};
pub use sprite::{Sprite, SpriteKind, SpriteMap};
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId, shade};
