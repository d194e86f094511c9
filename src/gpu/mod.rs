// ============================================
// GPU Module - Бесконечный процедурный terrain
// ============================================
// Ядро: генерация высот, кэш чанков, стриминг,
// заражённые тайлы и пульсы взрывов

pub mod core;
pub mod effects;
pub mod player;
pub mod render;
pub mod terrain;
pub mod world;

pub use self::core::app::run;
