// ============================================
// World - Заражение и декорации
// ============================================

pub mod decor;
pub mod infection;

pub use decor::DecorRegistry;
pub use infection::InfectedTiles;
