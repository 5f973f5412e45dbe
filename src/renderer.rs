use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::projector::{self, Strip};
use crate::raycaster;
use crate::world::{World, WorldError};

const CEILING: u32 = pack_rgb(15, 15, 15);
const FLOOR: u32 = pack_rgb(40, 40, 40);

#[inline]
const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRX8 in little-endian memory, alpha left at 0
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Renders one frame into a `width * height` BGRX buffer: background halves
/// first, then one wall strip per sampled column. The camera must not change
/// until this returns; columns read it concurrently.
pub fn render_frame(
    buf: &mut [u32],
    width: usize,
    height: usize,
    world: &World,
    camera: &Camera,
    config: &EngineConfig,
) -> Result<(), WorldError> {
    let mid = height / 2;
    buf[..mid * width].fill(CEILING);
    buf[mid * width..].fill(FLOOR);

    let plane = camera.plane(config.fov_scale);
    let stride = config.column_stride.max(1);
    let columns: Vec<usize> = (0..width).step_by(stride).collect();

    // Each column reads only the world and camera and owns its strip, so the
    // sweep parallelizes without any locking.
    let strips = columns
        .into_par_iter()
        .map(|column| {
            let hit = raycaster::cast(world.map(), camera, plane, column, width)?;
            Ok(projector::project(&hit, world.palette(), column, height))
        })
        .collect::<Result<Vec<Strip>, WorldError>>()?;

    for strip in &strips {
        let [r, g, b] = strip.color;
        let color = pack_rgb(r, g, b);
        let mut idx = strip.draw_start * width + strip.column;
        for _ in strip.draw_start..=strip.draw_end {
            buf[idx] = color;
            idx += width;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Map, Palette};
    use glam::Vec2;

    fn demo_world() -> World {
        let mut cells = vec![0u8; 11 * 11];
        for x in 0..11 {
            for y in 0..11 {
                if x == 0 || x == 10 || y == 0 || y == 10 {
                    cells[x * 11 + y] = 1;
                }
            }
        }
        let map = Map::new(11, 11, cells).unwrap();
        World::new(map, Palette::new(vec![[0, 0, 0], [105, 20, 14]])).unwrap()
    }

    #[test]
    fn every_column_gets_a_wall_slice_at_stride_one() {
        let world = demo_world();
        let camera = Camera::new(Vec2::new(5.5, 5.5), Vec2::new(0.0, 1.0));
        let config = EngineConfig::default();
        let (w, h) = (64, 48);
        let mut buf = vec![0u32; w * h];
        render_frame(&mut buf, w, h, &world, &camera, &config).unwrap();
        // Strips are centered, so the middle row is wall color everywhere.
        let mid_row = &buf[(h / 2) * w..(h / 2) * w + w];
        for &px in mid_row {
            assert_ne!(px, CEILING);
            assert_ne!(px, FLOOR);
        }
    }

    #[test]
    fn skipped_columns_keep_the_background() {
        let world = demo_world();
        let camera = Camera::new(Vec2::new(5.5, 5.5), Vec2::new(0.0, 1.0));
        let config = EngineConfig {
            column_stride: 2,
            ..EngineConfig::default()
        };
        let (w, h) = (64, 48);
        let mut buf = vec![0u32; w * h];
        render_frame(&mut buf, w, h, &world, &camera, &config).unwrap();
        let mid_row = &buf[(h / 2) * w..(h / 2) * w + w];
        for x in 0..w {
            if x % 2 == 0 {
                assert_ne!(mid_row[x], FLOOR, "sampled column {x} missing its strip");
            } else {
                assert_eq!(mid_row[x], FLOOR, "skipped column {x} was drawn");
            }
        }
    }

    #[test]
    fn background_halves_fill_rows_outside_the_walls() {
        let world = demo_world();
        // Far corner looking across the room: distant walls, short strips.
        let camera = Camera::new(Vec2::new(1.5, 1.5), Vec2::new(0.0, 1.0));
        let config = EngineConfig::default();
        let (w, h) = (64, 48);
        let mut buf = vec![0u32; w * h];
        render_frame(&mut buf, w, h, &world, &camera, &config).unwrap();
        assert_eq!(buf[0], CEILING);
        assert_eq!(buf[(h - 1) * w], FLOOR);
    }
}
