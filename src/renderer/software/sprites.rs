use smallvec::SmallVec;

use crate::{
    renderer::{Scene, software::Software},
    world::{self, Sprite, TextureBank},
};

/// Sprites keep at least this brightness no matter how far away.
const MIN_BRIGHTNESS: f32 = 0.2;

/// Contiguous span of screen columns where one sprite won the depth test.
/// Merged before blitting so occlusion is resolved once per run, not once
/// per drawn pixel.
type Runs = SmallVec<[(i32, i32); 8]>;

impl Software {
    /// Billboard sprite casting, painter's algorithm.
    ///
    /// Sorts far to near by squared planar distance, projects each base
    /// point through the inverse camera matrix, then draws only the
    /// column runs where the sprite is nearer than the wall depth the
    /// wall caster recorded. Must run after `cast_walls`.
    pub(crate) fn cast_sprites(&mut self, scene: &Scene, bank: &TextureBank) {
        let cam = scene.camera;

        let mut order: Vec<&Sprite> = scene.sprites.sprites.iter().collect();
        order.sort_by(|a, b| {
            let da = (cam.pos - a.pos).length_squared();
            let db = (cam.pos - b.pos).length_squared();
            db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
        });

        for sprite in order {
            // behind the camera (or at its exact position): never drawn
            let Some(proj) = cam.project(sprite.pos) else {
                continue;
            };

            let tex = bank.texture_or_missing(bank.id_or_missing(sprite.kind.texture_name()));
            if tex.w == 0 || tex.h == 0 {
                continue;
            }
            let aspect = tex.w as f32 / tex.h as f32;

            // full wall height at this depth, then the kind's share of it,
            // anchored to the floor line rather than centered
            let full_height = self.half_w / (cam.plane_y_initial * proj.transform_y);
            let sprite_height = full_height * sprite.kind.height_scale();
            let shift = cam.vertical_shift(proj.transform_y);
            let bottom = self.half_h + full_height * 0.5 + shift;
            let top = bottom - sprite_height;

            // billboard width from the texture aspect so non-square
            // sprites are not distorted
            let sprite_width = sprite_height * aspect;
            let screen_x = proj.screen_x(self.width_f);
            let left_edge = screen_x - sprite_width * 0.5;

            let x0 = left_edge.floor() as i32;
            let x1 = (screen_x + sprite_width * 0.5).ceil() as i32;
            if x1 < 0 || x0 >= self.width as i32 || sprite_width < 1.0 {
                continue;
            }

            let runs = self.visible_runs(x0, x1, proj.transform_y);
            if runs.is_empty() {
                continue;
            }

            // uniform multiplicative falloff over the whole billboard
            let alpha = proj.transform_y / self.light_range - scene.ambient;
            let brightness = (1.0 - alpha).clamp(MIN_BRIGHTNESS, 1.0);

            let y0 = top.max(0.0) as i32;
            let y1 = bottom.min(self.height_f - 1.0) as i32;
            if y1 < y0 {
                continue;
            }
            let v_step = tex.h as f32 / sprite_height;
            let u_step = tex.w as f32 / sprite_width;

            for &(run_x0, run_x1) in &runs {
                // U mapped proportionally across the merged run
                let mut u = (run_x0 as f32 - left_edge) * u_step;
                for x in run_x0..=run_x1 {
                    let tex_u = (u as usize).min(tex.w - 1);
                    let mut v = (y0 as f32 - top) * v_step;
                    for y in y0..=y1 {
                        // clamp like tex_u: v touches tex.h exactly when
                        // the billboard bottom lands on an integer row
                        let px = tex.texel(tex_u, (v as usize).min(tex.h - 1));
                        v += v_step;
                        if px >> 24 == 0 {
                            continue; // transparent texel
                        }
                        self.scratch[y as usize * self.width + x as usize] =
                            world::shade(px, brightness);
                    }
                    u += u_step;
                }
            }
        }
    }

    /// Merge the columns of `x0..=x1` (clipped to the screen) where depth
    /// `transform_y` beats the wall depth buffer into contiguous runs.
    pub(crate) fn visible_runs(&self, x0: i32, x1: i32, transform_y: f32) -> Runs {
        let mut runs = Runs::new();
        let mut open: Option<i32> = None;
        let lo = x0.max(0);
        let hi = x1.min(self.width as i32 - 1);
        for x in lo..=hi {
            if transform_y < self.zbuffer[x as usize] {
                if open.is_none() {
                    open = Some(x);
                }
            } else if let Some(start) = open.take() {
                runs.push((start, x - 1));
            }
        }
        if let Some(start) = open {
            runs.push((start, hi));
        }
        runs
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
