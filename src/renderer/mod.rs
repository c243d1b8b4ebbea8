//! Rendering abstraction layer.
//!
//! *The rest of the crate never touches a pixel buffer directly.*
//! A front-end hands a [`Scene`] snapshot to a type implementing
//! [`Renderer`]; the renderer owns all per-frame scratch (framebuffer,
//! column depth buffer) and loans the finished pixels out through
//! `end_frame`.
//!
//! The only back-end today is [`software::Software`], a single-threaded
//! per-column/per-scanline caster.

use crate::world::{Camera, Grid, SpriteMap, TextureBank, TextureId};

/// Pixel format of the software frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Texture handles for the level's fixed surfaces.
///
/// Sprite textures are resolved per kind through the bank by name; these
/// four are looked up once at load time instead of every frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneTextures {
    pub wall: TextureId,
    pub floor: TextureId,
    pub ceiling: TextureId,
    pub sky: TextureId,
}

/// Immutable-per-frame snapshot of everything the casters read.
///
/// Nothing here is mutated during rendering; the committed camera pose is
/// what a minimap or HUD collaborator would read after the frame.
pub struct Scene<'a> {
    pub grid: &'a Grid,
    pub sprites: &'a SpriteMap,
    pub camera: &'a Camera,
    pub textures: SceneTextures,
    /// Ambient light boost subtracted from the distance-falloff term.
    /// 0 = plain falloff; larger values push the darkness further out.
    pub ambient: f32,
}

/// A renderer that owns an internal scratch buffer for the whole frame.
///
/// Call order per frame is fixed: `begin_frame`, `draw_view`, optionally
/// `draw_overlay`, `end_frame`. `draw_view` runs the casters in their
/// strict order (sky, floor/ceiling, walls, sprites) — walls must fill
/// the depth buffer before sprites consume it.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Cast and composite the whole scene into the internal buffer.
    fn draw_view(&mut self, scene: &Scene, bank: &TextureBank);

    /// Blit the foreground overlay (held weapon), drawn last and
    /// unaffected by depth. `paces` drives the walk-bob phase.
    fn draw_overlay(&mut self, tex: TextureId, bank: &TextureBank, paces: f32);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    ///
    /// * `submit(&[Rgba], w, h)` is run exactly once per frame.
    /// * The minifb caller passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

pub mod software;

pub use software::Software;
