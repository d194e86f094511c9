// ============================================
// Terrain - Процедурный ландшафт
// ============================================
// Генерация высот, кэширование, сборка мешей чанков,
// оверлей заражения и потоковая выдача вокруг камеры.

pub mod altitude_cache;
pub mod cache;
pub mod chunk;
pub mod generation;
pub mod mesh;
pub mod overlay;
pub mod streaming;

pub use altitude_cache::AltitudeCache;
pub use cache::{ChunkKey, ChunkMeshCache};
pub use mesh::{MeshData, TerrainVertex};
pub use streaming::Terrain;
