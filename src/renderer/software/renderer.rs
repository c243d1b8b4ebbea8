use crate::{
    renderer::{Renderer, Rgba, Scene},
    world::{TextureBank, TextureId},
};

/// Default DDA range budget: how many grid lines a ray may cross before
/// the march gives up. Bounds every cast even on open or degenerate maps.
pub const DEFAULT_MAX_RANGE: i32 = 54;

/// Default distance (in cells) over which surfaces fade to full darkness.
pub const DEFAULT_LIGHT_RANGE: f32 = 15.0;

/// Classic per-column software caster.
///
/// Owns every piece of per-frame mutable render state — the scratch
/// framebuffer and the column depth buffer — allocated once and cleared
/// (not reallocated) each `begin_frame`. Never shared across frames in
/// flight; the whole pipeline is single-threaded by design.
pub struct Software {
    pub(crate) scratch: Vec<Rgba>,
    /// Per-column perpendicular wall distance, written by the wall caster,
    /// read-only for the sprite caster. Rebuilt from scratch every frame.
    pub(crate) zbuffer: Vec<f32>,

    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) width_f: f32,
    pub(crate) height_f: f32,
    pub(crate) half_w: f32,
    pub(crate) half_h: f32,

    pub(crate) max_range: i32,
    pub(crate) light_range: f32,
}

impl Default for Software {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RANGE, DEFAULT_LIGHT_RANGE)
    }
}

impl Software {
    pub fn new(max_range: i32, light_range: f32) -> Self {
        Self {
            scratch: Vec::new(),
            zbuffer: Vec::new(),
            width: 0,
            height: 0,
            width_f: 0.0,
            height_f: 0.0,
            half_w: 0.0,
            half_h: 0.0,
            max_range,
            light_range: light_range.max(f32::EPSILON),
        }
    }

    /// Depth recorded for column `x` this frame (test hook).
    #[cfg(test)]
    pub(crate) fn depth_at(&self, x: usize) -> f32 {
        self.zbuffer[x]
    }
}

impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.width_f = w as f32;
            self.height_f = h as f32;
            self.half_w = self.width_f * 0.5;
            self.half_h = self.height_f * 0.5;
            self.scratch.resize(w * h, 0);
            self.zbuffer.resize(w, 0.0);
        }
        // dark clear; the sky pass overdraws it when a panorama is loaded
        self.scratch.fill(0xFF_10_10_14);
        self.zbuffer.fill(f32::MAX);
    }

    /// One frame, fixed stage order. Walls must run before sprites: the
    /// depth buffer they produce is the sprite caster's occlusion input.
    fn draw_view(&mut self, scene: &Scene, bank: &TextureBank) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        self.draw_sky(scene, bank);
        self.cast_planes(scene, bank);
        self.cast_walls(scene, bank);
        self.cast_sprites(scene, bank);
    }

    fn draw_overlay(&mut self, tex_id: TextureId, bank: &TextureBank, paces: f32) {
        let tex = bank.texture_or_missing(tex_id);
        if tex.w == 0 || tex.h == 0 {
            return;
        }
        let scale = (self.width_f + self.height_f) / 1200.0;
        let bob_x = (paces * 2.0).cos() * scale * 6.0;
        let bob_y = (paces * 4.0).sin() * scale * 6.0;
        let left = self.width_f * 0.66 + bob_x;
        let top = self.height_f * 0.6 + bob_y;

        let dst_w = (tex.w as f32 * scale) as i32;
        let dst_h = (tex.h as f32 * scale) as i32;
        for dy in 0..dst_h {
            let y = top as i32 + dy;
            if y < 0 || y >= self.height as i32 {
                continue;
            }
            let v = (dy as f32 / scale) as usize;
            for dx in 0..dst_w {
                let x = left as i32 + dx;
                if x < 0 || x >= self.width as i32 {
                    continue;
                }
                let u = (dx as f32 / scale) as usize;
                let px = tex.texel(u, v);
                if px >> 24 == 0 {
                    continue; // transparent texel
                }
                self.scratch[y as usize * self.width + x as usize] = px;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}
