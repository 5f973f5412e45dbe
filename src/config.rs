/// Session tunables. Handed to the engine at startup; nothing here is global
/// state, so independent sessions cannot contaminate each other.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Projection-plane scale. Bigger means a wider apparent lens; it does
    /// not change the geometry, only how much world each column sweep covers.
    pub fov_scale: f32,
    /// Radians per second.
    pub rotation_speed: f32,
    /// Cells per second.
    pub movement_speed: f32,
    /// Columns advanced per strip. A stride above 1 trades horizontal
    /// resolution for throughput; skipped columns keep the background.
    pub column_stride: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fov_scale: 0.5,
            rotation_speed: 2.0,
            movement_speed: 7.0,
            column_stride: 1,
        }
    }
}
