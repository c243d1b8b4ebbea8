use crate::{
    renderer::{Scene, software::Software},
    world::{self, NEAR_EPS, TextureBank, WALL},
};

/// Stand-in for `1/ray_dir` when a ray component is exactly zero; the DDA
/// only ever compares the two delta distances, so any huge value works.
const DELTA_INF: f32 = 1e30;

/// Deepest shading overlay for an x-side wall face.
const MAX_DARKNESS_X: f32 = 0.8;
/// y-side faces get their falloff doubled, then this cap; perpendicular
/// and parallel faces read as differently lit.
const MAX_DARKNESS_Y: f32 = 0.85;

impl Software {
    /// Per-column DDA wall casting.
    ///
    /// Fills the depth buffer for *every* column — on a hit with the
    /// perpendicular wall distance, on range exhaustion with the distance
    /// marched — and draws the textured column only for hits.
    pub(crate) fn cast_walls(&mut self, scene: &Scene, bank: &TextureBank) {
        let cam = scene.camera;
        let Ok(tex) = bank.texture(scene.textures.wall) else {
            return; // texture not ready yet: skip the stage this frame
        };
        let grid = scene.grid;

        for column in 0..self.width {
            // x-coordinate in camera space, -1..1 across the view
            let camera_x = 2.0 * column as f32 / self.width_f - 1.0;
            let ray_dir = cam.dir + cam.plane * camera_x;

            // which cell of the map we're in
            let mut map_x = cam.pos.x.floor() as i32;
            let mut map_y = cam.pos.y.floor() as i32;

            // length of ray from one grid line to the next in each axis.
            // Left scaled to |ray_dir|; only the ratio matters to the DDA.
            let delta_dist_x = if ray_dir.x == 0.0 {
                DELTA_INF
            } else {
                (1.0 / ray_dir.x).abs()
            };
            let delta_dist_y = if ray_dir.y == 0.0 {
                DELTA_INF
            } else {
                (1.0 / ray_dir.y).abs()
            };

            // step direction and distance to the first grid line per axis
            let (step_x, mut side_dist_x) = if ray_dir.x < 0.0 {
                (-1, (cam.pos.x - map_x as f32) * delta_dist_x)
            } else {
                (1, (map_x as f32 + 1.0 - cam.pos.x) * delta_dist_x)
            };
            let (step_y, mut side_dist_y) = if ray_dir.y < 0.0 {
                (-1, (cam.pos.y - map_y as f32) * delta_dist_y)
            } else {
                (1, (map_y as f32 + 1.0 - cam.pos.y) * delta_dist_y)
            };

            let mut hit = false;
            let mut side = 0u8; // 0 = crossed an x grid line, 1 = a y grid line
            let mut remaining = self.max_range;

            // The range budget guarantees termination even when the grid
            // keeps answering with the out-of-bounds sentinel.
            while !hit && remaining >= 0 {
                if side_dist_x < side_dist_y {
                    side_dist_x += delta_dist_x;
                    map_x += step_x;
                    side = 0;
                } else {
                    side_dist_y += delta_dist_y;
                    map_y += step_y;
                    side = 1;
                }
                if grid.cell(map_x, map_y) == WALL {
                    hit = true;
                }
                remaining -= 1;
            }

            // Distance projected onto the camera direction; Euclidean
            // distance to the hit point would give a fisheye view. The
            // last step overshot into the wall, so back out one delta.
            // Exactly 0 when the camera sits on the hit grid line, so
            // floor it at the near epsilon before dividing by it.
            let perp_dist = if side == 0 {
                side_dist_x - delta_dist_x
            } else {
                side_dist_y - delta_dist_y
            }
            .max(NEAR_EPS);

            self.zbuffer[column] = perp_dist;

            if !hit {
                continue;
            }

            // exact fractional hit position along the wall face
            let wall_x = if side == 0 {
                cam.pos.y + perp_dist * ray_dir.y
            } else {
                cam.pos.x + perp_dist * ray_dir.x
            };
            let wall_x = wall_x - wall_x.floor();

            let mut tex_x = (wall_x * tex.w as f32) as i32;
            // mirror U so texture orientation matches from both directions
            if (side == 0 && ray_dir.x > 0.0) || (side == 1 && ray_dir.y < 0.0) {
                tex_x = tex.w as i32 - tex_x - 1;
            }
            let tex_x = tex_x.clamp(0, tex.w as i32 - 1) as usize;

            // vertical extent, scaled by the spawn-time focal length so
            // wall height stays put while the plane vector rotates
            let line_height = self.half_w / (cam.plane_y_initial * perp_dist);
            let shift = cam.vertical_shift(perp_dist);
            let draw_start = self.half_h - line_height * 0.5 + shift;
            let draw_end = self.half_h + line_height * 0.5 + shift;

            let mut alpha = perp_dist / self.light_range - scene.ambient;
            alpha = alpha.min(MAX_DARKNESS_X);
            if side == 1 {
                alpha *= 2.0;
            }
            let brightness = 1.0 - alpha.clamp(0.0, MAX_DARKNESS_Y);

            let y0 = draw_start.max(0.0) as i32;
            let y1 = draw_end.min(self.height_f - 1.0) as i32;
            if y1 < y0 {
                continue; // column entirely off-screen after pitch/jump shift
            }
            let v_step = tex.h as f32 / line_height;
            let mut v = (y0 as f32 - draw_start) * v_step;
            for y in y0 as usize..=y1 as usize {
                // v touches tex.h exactly when draw_end lands on an
                // integer row; clamp so it cannot wrap back to row 0
                let px = tex.texel(tex_x, (v as usize).min(tex.h - 1));
                self.scratch[y * self.width + column] = world::shade(px, brightness);
                v += v_step;
            }
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use crate::renderer::{Renderer, Scene, SceneTextures};
    use crate::renderer::software::Software;
    use crate::world::{Camera, Grid, SpriteMap, Texture, TextureBank};
    use glam::vec2;

    fn scene<'a>(
        grid: &'a Grid,
        sprites: &'a SpriteMap,
        camera: &'a Camera,
    ) -> Scene<'a> {
        Scene {
            grid,
            sprites,
            camera,
            textures: SceneTextures {
                wall: 0,
                floor: 0,
                ceiling: 0,
                sky: 0,
            },
            ambient: 0.0,
        }
    }

    fn cast(grid: &Grid, camera: Camera, w: usize, h: usize) -> Software {
        let sprites = SpriteMap::default();
        let bank = TextureBank::default_with_checker();
        let sc = scene(grid, &sprites, &camera);
        let mut sw = Software::default();
        sw.begin_frame(w, h);
        sw.cast_walls(&sc, &bank);
        sw
    }

    /// Every ray cast from inside a wall ring terminates within range:
    /// all recorded depths are finite and bounded by the map diagonal.
    #[test]
    fn all_rays_terminate_inside_ring() {
        let grid = Grid::bordered(16);
        for (dir, plane) in [
            (vec2(1.0, 0.0), vec2(0.0, 0.66)),
            (vec2(0.0, 1.0), vec2(-0.66, 0.0)),
            (vec2(-0.7071, 0.7071), vec2(-0.4667, -0.4667)),
        ] {
            let cam = Camera::new(vec2(7.3, 8.6), dir, plane);
            let sw = cast(&grid, cam, 120, 80);
            for x in 0..120 {
                let d = sw.depth_at(x);
                assert!(d > 0.0 && d < 24.0, "column {x}: depth {d}");
            }
        }
    }

    /// spec scenario: 8x8 bordered grid, camera at (4,4) facing +x.
    /// The center column's ray crosses x = 5, 6, 7 and hits the wall cell
    /// at x = 7, i.e. a perpendicular distance of 3.
    #[test]
    fn head_on_center_column_distance() {
        let grid = Grid::bordered(8);
        let cam = Camera::new(vec2(4.0, 4.0), vec2(1.0, 0.0), vec2(0.0, 0.66));
        let sw = cast(&grid, cam, 101, 60);
        let center = sw.depth_at(50);
        assert!((center - 3.0).abs() < 0.05, "center depth {center}");
    }

    /// Perpendicular distance must not depend on the sign or magnitude of
    /// camera_x when the wall is flat and head-on: no fisheye bowing.
    #[test]
    fn flat_wall_has_uniform_depth() {
        let grid = Grid::bordered(32);
        let cam = Camera::new(vec2(16.5, 16.5), vec2(1.0, 0.0), vec2(0.0, 0.66));
        let sw = cast(&grid, cam, 160, 100);
        // columns whose rays land on the x = 31 face span most of the
        // screen here; compare a symmetric band around the center
        let center = sw.depth_at(80);
        for x in 40..120 {
            let d = sw.depth_at(x);
            assert!(
                (d - center).abs() < 1e-3,
                "column {x}: {d} vs center {center}"
            );
        }
    }

    /// Standing exactly on the grid line of the hit face makes the raw
    /// perpendicular distance 0; the recorded depth must still be a
    /// positive finite value, never a division blow-up.
    #[test]
    fn camera_on_grid_line_keeps_depth_positive() {
        // wall slab fills column x = 1; camera stands on the x = 2 line
        let mut cells = vec![0u8; 16];
        for y in 0..4 {
            cells[y * 4 + 1] = 1;
        }
        let grid = Grid::from_cells(4, cells);
        let cam = Camera::new(vec2(2.0, 2.5), vec2(-1.0, 0.0), vec2(0.0, 0.66));
        let sw = cast(&grid, cam, 40, 30);
        let d = sw.depth_at(20);
        assert!(d > 0.0 && d.is_finite(), "center depth {d}");
    }

    /// A column whose vertical extent ends exactly on an integer row must
    /// sample the last texel row at its base, not wrap back to row 0.
    #[test]
    fn integer_aligned_column_does_not_wrap_to_row_zero() {
        const RED: u32 = 0xFF_FF0000;
        const BLUE: u32 = 0xFF_0000FF;

        let grid = Grid::bordered(8);
        // plane 0.5 at distance 2: line_height 50, rows 25..75 exactly
        let cam = Camera::new(vec2(5.0, 4.5), vec2(1.0, 0.0), vec2(0.0, 0.5));

        let mut bank = TextureBank::default_with_checker();
        let mut pixels = vec![BLUE; 64];
        pixels[..8].fill(RED); // top texel row only
        let wall = bank
            .insert(
                "TWOTONE",
                Texture {
                    name: "TWOTONE".into(),
                    w: 8,
                    h: 8,
                    pixels,
                },
            )
            .unwrap();

        let sprites = SpriteMap::default();
        let sc = Scene {
            grid: &grid,
            sprites: &sprites,
            camera: &cam,
            textures: SceneTextures {
                wall,
                floor: 0,
                ceiling: 0,
                sky: 0,
            },
            ambient: 1.0, // full brightness, texels land unshaded
        };
        let mut sw = Software::default();
        sw.begin_frame(100, 100);
        sw.cast_walls(&sc, &bank);

        assert_eq!(sw.scratch[25 * 100 + 50], RED);
        assert_eq!(sw.scratch[75 * 100 + 50], BLUE);
    }

    /// Open map (no walls at all): the march must still terminate and
    /// record the marched distance, not hang or store garbage.
    #[test]
    fn range_budget_bounds_open_map() {
        let grid = Grid::from_cells(4, vec![0u8; 16]);
        let cam = Camera::new(vec2(2.0, 2.0), vec2(1.0, 0.0), vec2(0.0, 0.66));
        let sw = cast(&grid, cam, 40, 30);
        for x in 0..40 {
            let d = sw.depth_at(x);
            assert!(d.is_finite() && d > 0.0);
        }
    }
}
