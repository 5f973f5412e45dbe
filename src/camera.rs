use glam::Vec2;

/// Camera pose in grid space: cell (i, j) spans [i, i+1) x [j, j+1). The
/// direction vector's magnitude acts as zoom and is normally 1.
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
}

impl Camera {
    pub fn new(pos: Vec2, dir: Vec2) -> Self {
        Self { pos, dir }
    }

    /// Projection plane: the view direction rotated 90 degrees and scaled by
    /// the FOV factor. Derived fresh from `dir`, never stored.
    #[inline]
    pub fn plane(&self, fov_scale: f32) -> Vec2 {
        self.dir.perp() * fov_scale
    }

    /// Rotates the view direction by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        self.dir = Vec2::from_angle(angle).rotate(self.dir);
    }
}
