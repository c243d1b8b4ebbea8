use crate::{
    renderer::{Scene, software::Software},
    world::{self, FLOOR_CEIL, TextureBank},
};

/// Deepest shading overlay for horizontal surfaces.
const MAX_DARKNESS: f32 = 0.8;

impl Software {
    /// Scanline floor/ceiling casting.
    ///
    /// Rows of a flat floor are iso-distance lines, so stepping the world
    /// position linearly across each row is affine in screen space yet
    /// exact per row. The row distance lives in the same depth space as
    /// the wall caster's perpendicular distance (both divide by
    /// `plane_y_initial`), which keeps floor seams glued to wall bases.
    pub(crate) fn cast_planes(&mut self, scene: &Scene, bank: &TextureBank) {
        let cam = scene.camera;
        let (Ok(floor_tex), Ok(ceil_tex)) = (
            bank.texture(scene.textures.floor),
            bank.texture(scene.textures.ceiling),
        ) else {
            return; // textures not ready yet: skip the stage this frame
        };
        let grid = scene.grid;

        // ray directions for the leftmost (x = 0) and rightmost columns
        let ray0 = cam.dir - cam.plane;
        let ray1 = cam.dir + cam.plane;
        let ray_span = ray1 - ray0;

        // matches the wall caster: line_height = w/2 / (plane_y_initial*d)
        let distance_divider = 2.0 * (self.height_f / self.width_f) * cam.plane_y_initial;

        for y in 0..self.height {
            let yf = y as f32;
            let is_floor = yf > self.half_h + cam.pitch;

            // row offset from the (pitch-shifted) horizon
            let p = if is_floor {
                yf - self.half_h - cam.pitch
            } else {
                self.half_h - yf + cam.pitch
            };
            if p <= 0.0 {
                continue; // the horizon row itself projects to infinity
            }

            // vertical camera position; jumping raises the eye over the
            // floor and squeezes it toward the ceiling
            let cam_z = if is_floor {
                self.half_h + cam.z
            } else {
                self.half_h - cam.z
            };

            let row_distance = cam_z / (p * distance_divider);

            let alpha = (row_distance / self.light_range - scene.ambient).clamp(0.0, MAX_DARKNESS);
            let brightness = 1.0 - alpha;

            let step = ray_span * (row_distance / self.width_f);
            let mut world_pos = cam.pos + ray0 * row_distance;

            let tex = if is_floor { floor_tex } else { ceil_tex };
            let row = &mut self.scratch[y * self.width..][..self.width];

            for x in 0..self.width {
                let cell = grid.get(world_pos.x, world_pos.y);
                if cell == FLOOR_CEIL {
                    let tx = (tex.w as f32 * (world_pos.x - world_pos.x.floor())) as usize;
                    let ty = (tex.h as f32 * (world_pos.y - world_pos.y.floor())) as usize;
                    row[x] = world::shade(tex.texel(tx, ty), brightness);
                }
                // any other code (empty, wall, out-of-bounds sentinel)
                // leaves the sky/clear color showing through
                world_pos += step;
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
