use std::f32::consts::TAU;

use crate::{
    renderer::{Scene, software::Software},
    world::TextureBank,
};

impl Software {
    /// Panorama backdrop, first stage of the frame.
    ///
    /// The panorama is stretched to twice the screen height's worth of
    /// width and scrolled horizontally in proportion to the camera
    /// heading; sampling wraps with `rem_euclid`, so a full turn tiles
    /// without a seam.
    pub(crate) fn draw_sky(&mut self, scene: &Scene, bank: &TextureBank) {
        let Ok(tex) = bank.texture(scene.textures.sky) else {
            return; // panorama not ready yet: keep the clear color
        };
        if tex.w == 0 || tex.h == 0 {
            return;
        }

        // drawn panorama width in screen pixels
        let drawn_width = tex.w as f32 * (self.height_f / tex.h as f32) * 2.0;
        let left = scene.camera.heading() / TAU * -drawn_width;

        let u_scale = tex.w as f32 / drawn_width;
        let v_scale = tex.h as f32 / self.height_f;

        for x in 0..self.width {
            let u = ((x as f32 - left) * u_scale).rem_euclid(tex.w as f32) as usize;
            for y in 0..self.height {
                let v = (y as f32 * v_scale) as usize;
                self.scratch[y * self.width + x] = tex.texel(u, v);
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
    use std::f32::consts::FRAC_PI_2;

    fn sky_bank() -> (TextureBank, SceneTextures) {
        let mut bank = TextureBank::default_with_checker();
        // horizontal gradient so scrolling is observable
        let w = 64usize;
        let pixels = (0..w * 4)
            .map(|i| 0xFF_000000 | ((i % w) as u32) << 16)
            .collect();
        let id = bank
            .insert(
                "SKY",
                Texture {
                    name: "SKY".into(),
                    w,
                    h: 4,
                    pixels,
                },
            )
            .unwrap();
        let textures = SceneTextures {
            wall: 0,
            floor: 0,
            ceiling: 0,
            sky: id,
        };
        (bank, textures)
    }

    fn draw(dir: glam::Vec2) -> Software {
        let grid = Grid::bordered(8);
        let sprites = SpriteMap::default();
        let plane = 0.66 * dir.perp();
        let camera = Camera::new(vec2(4.0, 4.0), dir, plane);
        let (bank, textures) = sky_bank();
        let scene = Scene {
            grid: &grid,
            sprites: &sprites,
            camera: &camera,
            textures,
            ambient: 0.0,
        };
        let mut sw = Software::default();
        sw.begin_frame(48, 32);
        sw.draw_sky(&scene, &bank);
        sw
    }

    /// Every pixel of the frame is a panorama texel, no matter which way
    /// the camera faces, including diagonals where the heading is not a
    /// multiple of a quarter turn.
    #[test]
    fn sky_covers_entire_frame() {
        for dir in [
            vec2(1.0, 0.0),
            vec2(0.0, -1.0),
            vec2(FRAC_PI_2.cos(), FRAC_PI_2.sin()),
            vec2(-0.7071, 0.7071),
        ] {
            let sw = draw(dir);
            // gradient texels are 0xFF_RR0000 with RR < 64
            assert!(sw.scratch.iter().all(|&px| {
                px >> 24 == 0xFF && px & 0xFFFF == 0 && (px >> 16 & 0xFF) < 64
            }));
        }
    }

    /// Turning the camera scrolls the panorama.
    #[test]
    fn sky_tracks_heading() {
        let straight = draw(vec2(1.0, 0.0)).scratch[..48].to_vec();
        let turned = draw(vec2(0.0, 1.0)).scratch[..48].to_vec();
        assert_ne!(straight, turned, "quarter turn must scroll the panorama");
    }
}
