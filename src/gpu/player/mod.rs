// ============================================
// Player - Корабль и камера
// ============================================

pub mod camera;
pub mod ship;

pub use camera::Camera;
pub use ship::Ship;
