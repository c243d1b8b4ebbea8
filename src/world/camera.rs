use glam::{Vec2, vec2};

/// Forward depths at or below this count as "behind the camera".
pub const NEAR_EPS: f32 = 1e-4;

/// Result of pushing a world point through the inverse camera matrix.
///
/// `transform_y` is the projection onto the forward axis, *not* the
/// Euclidean distance — comparing it against the wall depth buffer is what
/// keeps sprites fisheye-free.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    /// Lateral camera-space coordinate, in plane-lengths.
    pub transform_x: f32,
    /// Forward camera-space depth, always `> NEAR_EPS`.
    pub transform_y: f32,
}

impl Projection {
    /// Screen column of the projected point for a viewport `width` px wide.
    #[inline]
    pub fn screen_x(&self, width: f32) -> f32 {
        width * 0.5 * (1.0 + self.transform_x / self.transform_y)
    }
}

/// Viewpoint in world space.
///
/// * `dir` and `plane` form the 2×2 camera basis; `plane` stays
///   perpendicular to `dir` and its magnitude encodes the half field of
///   view (focal length = `1 / |plane|`).
/// * `pitch` and `z` are vertical screen shifts in device pixels — the
///   vertical-shear stand-in for real pitch.
/// * `plane_y_initial` is the plane magnitude at spawn; every vertical
///   scale in the renderer divides by it, so wall heights do not breathe
///   as the plane vector rotates through the axes.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub pos: Vec2,
    pub z: f32,
    pub dir: Vec2,
    pub plane: Vec2,
    pub pitch: f32,
    pub plane_y_initial: f32,
}

impl Camera {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self {
            pos,
            z: 0.0,
            dir,
            plane,
            pitch: 0.0,
            plane_y_initial: plane.length(),
        }
    }

    /// Rotate the view by `angle` radians.
    ///
    /// Both basis vectors get the same rotation matrix in one go, which is
    /// what preserves their perpendicularity.
    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = (-angle).sin_cos();
        self.dir = vec2(
            self.dir.x * cos - self.dir.y * sin,
            self.dir.x * sin + self.dir.y * cos,
        );
        self.plane = vec2(
            self.plane.x * cos - self.plane.y * sin,
            self.plane.x * sin + self.plane.y * cos,
        );
    }

    /// Transform world point `p` into camera space via the inverted basis:
    ///
    /// ```text
    /// [ plane.x  dir.x ]^-1                1              [  dir.y   -dir.x  ]
    /// [ plane.y  dir.y ]    = ─────────────────────────── [ -plane.y  plane.x ]
    ///                         plane.x·dir.y − dir.x·plane.y
    /// ```
    ///
    /// Returns `None` for points behind (or within `NEAR_EPS` of) the
    /// camera plane, and for a degenerate basis — callers skip those
    /// instead of dividing by ~0.
    pub fn project(&self, p: Vec2) -> Option<Projection> {
        let rel = p - self.pos;
        let det = self.plane.x * self.dir.y - self.dir.x * self.plane.y;
        if det.abs() < NEAR_EPS {
            return None;
        }
        let inv_det = 1.0 / det;
        let transform_x = inv_det * (self.dir.y * rel.x - self.dir.x * rel.y);
        let transform_y = inv_det * (-self.plane.y * rel.x + self.plane.x * rel.y);
        if transform_y <= NEAR_EPS {
            return None;
        }
        Some(Projection {
            transform_x,
            transform_y,
        })
    }

    /// Vertical screen shift applied to anything drawn at forward depth
    /// `depth`: the pitch shear plus the jump/bob parallax. Shared by the
    /// wall and sprite casters so both stay glued to the same horizon.
    #[inline]
    pub fn vertical_shift(&self, depth: f32) -> f32 {
        self.pitch + self.z / (depth * self.plane_y_initial)
    }

    /// Heading angle used for the sky parallax.
    #[inline]
    pub fn heading(&self) -> f32 {
        self.dir.x.atan2(self.dir.y) + std::f32::consts::PI
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_4, TAU};

    fn cam(dir: Vec2, plane: Vec2) -> Camera {
        Camera::new(vec2(10.0, 5.0), dir, plane)
    }

    #[test]
    fn full_turn_restores_basis() {
        let mut c = cam(vec2(1.0, 0.0), vec2(0.0, 0.66));
        let steps = 48;
        for _ in 0..steps {
            c.rotate(TAU / steps as f32);
        }
        assert!((c.dir - vec2(1.0, 0.0)).length() < 1e-4);
        assert!((c.plane - vec2(0.0, 0.66)).length() < 1e-4);
    }

    #[test]
    fn rotation_keeps_basis_perpendicular() {
        let mut c = cam(vec2(1.0, 0.0), vec2(0.0, 0.66));
        for _ in 0..7 {
            c.rotate(0.613);
            assert!(c.dir.dot(c.plane).abs() < 1e-5);
            assert!((c.plane.length() - 0.66).abs() < 1e-5);
        }
    }

    #[test]
    fn point_straight_ahead_projects_to_screen_center() {
        // camera at (10,5) looking at +y towards (10,10)
        let c = cam(vec2(0.0, 1.0), vec2(-0.66, 0.0));
        let p = c.project(vec2(10.0, 10.0)).unwrap();
        assert!((p.transform_y - 5.0).abs() < 1e-5);
        assert!(p.transform_x.abs() < 1e-5);
        assert!((p.screen_x(640.0) - 320.0).abs() < 0.5);
    }

    #[test]
    fn point_at_camera_is_rejected() {
        let c = cam(vec2(1.0, 0.0), vec2(0.0, 0.66));
        assert!(c.project(c.pos).is_none());
        assert!(c.project(c.pos - vec2(0.5, 0.0)).is_none());
    }

    #[test]
    fn degenerate_basis_is_rejected() {
        // plane parallel to dir -> zero determinant
        let c = cam(vec2(1.0, 0.0), vec2(0.5, 0.0));
        assert!(c.project(vec2(20.0, 5.0)).is_none());
    }

    #[test]
    fn left_frustum_edge_lands_on_column_zero() {
        let c = cam(vec2(1.0, 0.0), vec2(0.0, 0.66));
        let p = c.project(c.pos + (c.dir - c.plane) * 3.0).unwrap();
        assert!(p.screen_x(640.0).abs() < 0.01);
    }

    /// The inverse-matrix route must agree with an independent
    /// trigonometric projection, screen_x = w/2·(1 + tanθ/|plane|),
    /// where θ is the point's bearing off the view axis.
    #[test]
    fn matches_trigonometric_projection() {
        let configs = [
            (vec2(1.0, 0.0), vec2(0.0, 0.66)),
            (vec2(0.0, -1.0), vec2(-0.66, 0.0)),
            (
                vec2(FRAC_PI_4.cos(), FRAC_PI_4.sin()),
                vec2(-0.66 * FRAC_PI_4.sin(), 0.66 * FRAC_PI_4.cos()),
            ),
        ];
        let width = 800.0_f32;
        for (dir, plane) in configs {
            let c = cam(dir, plane);
            let point = c.pos + dir * 4.0 + plane * 1.1;
            let p = c.project(point).unwrap();

            let rel = point - c.pos;
            let forward = rel.dot(dir.normalize());
            let along_plane = rel.dot(plane.normalize());
            let trig_x = width * 0.5 * (1.0 + along_plane / forward / plane.length());

            assert!(
                (p.screen_x(width) - trig_x).abs() < 0.01,
                "dir {dir:?}: {} vs {}",
                p.screen_x(width),
                trig_x
            );
            assert!((p.transform_y - forward).abs() < 1e-3);
        }
    }
}
