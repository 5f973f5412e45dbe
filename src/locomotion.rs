use glam::Vec2;

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::world::Map;

/// Boolean movement intents sampled once per tick from the input source.
#[derive(Debug, Default, Clone, Copy)]
pub struct Intents {
    pub turn_left: bool,
    pub turn_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
}

/// Applies one tick of turning and movement to the camera. A blocked move is
/// silently dropped; the camera never ends up inside a wall cell.
pub fn apply(camera: &mut Camera, map: &Map, intents: Intents, dt: f32, config: &EngineConfig) {
    let turn = config.rotation_speed * dt;
    if intents.turn_left {
        camera.rotate(-turn);
    }
    if intents.turn_right {
        camera.rotate(turn);
    }

    let mut delta = Vec2::ZERO;
    if intents.move_forward {
        delta += camera.dir;
    }
    if intents.move_backward {
        delta -= camera.dir;
    }
    // Strafing runs along the view direction rotated 90 degrees.
    let side = Vec2::new(camera.dir.y, -camera.dir.x);
    if intents.strafe_left {
        delta += side;
    }
    if intents.strafe_right {
        delta -= side;
    }
    if delta == Vec2::ZERO {
        return;
    }
    delta *= config.movement_speed * dt;

    // Each axis is checked on its own, so diagonal movement into a wall
    // slides along it instead of sticking.
    let nx = camera.pos.x + delta.x;
    if map.is_open(nx.floor() as i32, camera.pos.y.floor() as i32) {
        camera.pos.x = nx;
    }
    let ny = camera.pos.y + delta.y;
    if map.is_open(camera.pos.x.floor() as i32, ny.floor() as i32) {
        camera.pos.y = ny;
    }
}
