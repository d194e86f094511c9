// ============================================
// Cache - Ключи и кэш мешей чанков
// ============================================

mod chunk_key;
mod mesh_cache;

pub use chunk_key::ChunkKey;
pub use mesh_cache::ChunkMeshCache;
