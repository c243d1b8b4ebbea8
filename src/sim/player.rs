use std::f32::consts::PI;

use glam::Vec2;

use crate::{
    sim::ControlState,
    world::{Camera, Grid, WALL},
};

/// Turn rate while a rotate key is held, radians per second.
const ROT_SPEED: f32 = 4.0 * PI / 5.0;
/// Walk speed, cells per second.
const WALK_SPEED: f32 = 3.0;
/// Collision probe offset ahead of the player, in cells.
const WALK_SAFETY: f32 = 0.2;

/// Pitch change while a look key is held, screen pixels per second.
const LOOK_SPEED: f32 = 400.0;
const PITCH_MAX: f32 = 200.0;

/// Eye height change while a jump key is held, screen pixels per second.
const JUMP_SPEED: f32 = 400.0;
const Z_MAX: f32 = 300.0;

/// Pitch and eye height drift back to neutral at this rate once the
/// keys are released.
const RECENTER_SPEED: f32 = 100.0;

/// The walking viewpoint: a camera plus the gait phase that drives the
/// overlay bob.
pub struct Player {
    pub camera: Camera,
    /// Accumulated walk distance, the phase input for weapon bobbing.
    pub paces: f32,
}

impl Player {
    pub fn new(camera: Camera) -> Self {
        Self { camera, paces: 0.0 }
    }

    /// Advance along the view direction, sliding rather than sticking:
    /// each axis is blocked independently, probing `WALK_SAFETY` ahead so
    /// the near plane never ends up inside a wall face.
    pub fn walk(&mut self, distance: f32, grid: &Grid) {
        let cam = &mut self.camera;
        let delta = cam.dir * distance;
        let probe = Vec2::new(
            WALK_SAFETY.copysign(delta.x),
            WALK_SAFETY.copysign(delta.y),
        );

        if grid.get(cam.pos.x + delta.x + probe.x, cam.pos.y) != WALL {
            cam.pos.x += delta.x;
        }
        if grid.get(cam.pos.x, cam.pos.y + delta.y + probe.y) != WALL {
            cam.pos.y += delta.y;
        }
        self.paces += distance;
    }

    pub fn look_up(&mut self, dt: f32) {
        self.camera.pitch = (self.camera.pitch + LOOK_SPEED * dt).min(PITCH_MAX);
    }

    pub fn look_down(&mut self, dt: f32) {
        self.camera.pitch = (self.camera.pitch - LOOK_SPEED * dt).max(-PITCH_MAX);
    }

    pub fn jump_up(&mut self, dt: f32) {
        self.camera.z = (self.camera.z + JUMP_SPEED * dt).min(Z_MAX);
    }

    pub fn jump_down(&mut self, dt: f32) {
        self.camera.z = (self.camera.z - JUMP_SPEED * dt).max(0.0);
    }

    /// One simulation tick: apply held controls, then let pitch and eye
    /// height drift back toward neutral.
    pub fn update(&mut self, controls: ControlState, grid: &Grid, dt: f32) {
        if controls.contains(ControlState::LEFT) {
            self.camera.rotate(-ROT_SPEED * dt);
        }
        if controls.contains(ControlState::RIGHT) {
            self.camera.rotate(ROT_SPEED * dt);
        }
        if controls.contains(ControlState::FORWARD) {
            self.walk(WALK_SPEED * dt, grid);
        }
        if controls.contains(ControlState::BACKWARD) {
            self.walk(-WALK_SPEED * dt, grid);
        }
        if controls.contains(ControlState::JUMP_DOWN) {
            self.jump_down(dt);
        }
        if controls.contains(ControlState::JUMP_UP) {
            self.jump_up(dt);
        }
        if controls.contains(ControlState::LOOK_DOWN) {
            self.look_down(dt);
        }
        if controls.contains(ControlState::LOOK_UP) {
            self.look_up(dt);
        }

        let cam = &mut self.camera;
        if cam.pitch > 0.0 {
            cam.pitch = (cam.pitch - RECENTER_SPEED * dt).max(0.0);
        } else if cam.pitch < 0.0 {
            cam.pitch = (cam.pitch + RECENTER_SPEED * dt).min(0.0);
        }
        if cam.z > 0.0 {
            cam.z = (cam.z - RECENTER_SPEED * dt).max(0.0);
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
