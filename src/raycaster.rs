use glam::Vec2;

use crate::camera::Camera;
use crate::world::{Map, WorldError};

/// Which grid-line family a ray crossed to enter its hit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// First wall cell struck by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub map_x: i32,
    pub map_y: i32,
    pub kind: u8,
    pub axis: Axis,
    /// Distance measured perpendicular to the camera plane, not point to
    /// point. Euclidean distance would bow walls outward at the screen edges.
    pub distance: f32,
}

/// Normalized horizontal offset of a screen column, in [-1, 1).
#[inline]
pub fn column_offset(column: usize, viewport_w: usize) -> f32 {
    2.0 * column as f32 / viewport_w as f32 - 1.0
}

/// Casts the ray for one screen column.
pub fn cast(
    map: &Map,
    camera: &Camera,
    plane: Vec2,
    column: usize,
    viewport_w: usize,
) -> Result<Hit, WorldError> {
    let ray_dir = camera.dir + plane * column_offset(column, viewport_w);
    cast_dir(map, camera.pos, ray_dir)
}

/// DDA walk from `origin` along `ray_dir` to the first wall cell.
///
/// Side distances are scaled by the opposite axis component, which keeps the
/// two comparable as distance along the ray without normalizing. It also
/// handles degenerate rays for free: a zero component leaves its opposite
/// side distance frozen, so the walk never steps the dead axis.
pub fn cast_dir(map: &Map, origin: Vec2, ray_dir: Vec2) -> Result<Hit, WorldError> {
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;

    let (step_x, mut side_x) = if ray_dir.x < 0.0 {
        (-1, (origin.x - map_x as f32) * ray_dir.y.abs())
    } else {
        (1, (map_x as f32 + 1.0 - origin.x) * ray_dir.y.abs())
    };
    let (step_y, mut side_y) = if ray_dir.y < 0.0 {
        (-1, (origin.y - map_y as f32) * ray_dir.x.abs())
    } else {
        (1, (map_y as f32 + 1.0 - origin.y) * ray_dir.x.abs())
    };

    // A closed perimeter stops the walk within rows + cols steps; the budget
    // turns a broken map into an OutOfBounds error instead of a runaway loop.
    let budget = map.rows() + map.cols() + 2;
    for _ in 0..budget {
        let axis = if side_x < side_y {
            map_x += step_x;
            side_x += ray_dir.y.abs();
            Axis::X
        } else {
            map_y += step_y;
            side_y += ray_dir.x.abs();
            Axis::Y
        };

        let kind = map.kind_at(map_x, map_y)?;
        if kind > 0 {
            // Perpendicular distance to the wall face that was entered.
            let distance = match axis {
                Axis::X => {
                    ((map_x as f32 - origin.x + (1 - step_x) as f32 / 2.0) / ray_dir.x).abs()
                }
                Axis::Y => {
                    ((map_y as f32 - origin.y + (1 - step_y) as f32 / 2.0) / ray_dir.y).abs()
                }
            };
            return Ok(Hit {
                map_x,
                map_y,
                kind,
                axis,
                distance,
            });
        }
    }

    Err(WorldError::OutOfBounds { x: map_x, y: map_y })
}
