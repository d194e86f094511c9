// ============================================
// Generation - Шум и карта высот
// ============================================

pub mod height;
pub mod noise;

pub use height::{altitude, corner_height, grid_sample, interpolate_quad};
pub use noise::{fbm2d, hash2d, noise2d};
