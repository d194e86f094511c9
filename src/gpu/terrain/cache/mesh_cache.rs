// ============================================
// Mesh Cache - Кэш построенных мешей чанков
// ============================================
// Та же политика, что и у кэша высот: полный сброс при
// переполнении. Порог намеренно низкий - меши на порядки
// тяжелее скаляров высот.

use std::collections::HashMap;

use crate::gpu::core::config::CHUNK_CACHE_LIMIT;
use crate::gpu::terrain::altitude_cache::AltitudeCache;
use crate::gpu::terrain::chunk::build_chunk_mesh;
use crate::gpu::terrain::mesh::MeshData;

use super::chunk_key::ChunkKey;

pub struct ChunkMeshCache {
    entries: HashMap<ChunkKey, MeshData>,
    limit: usize,
    builds: u64,
}

impl ChunkMeshCache {
    pub fn new() -> Self {
        Self::with_limit(CHUNK_CACHE_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(64),
            limit,
            builds: 0,
        }
    }

    /// Меш чанка: из кэша или построить и запомнить
    pub fn get_or_build(&mut self, key: ChunkKey, altitudes: &mut AltitudeCache) -> &MeshData {
        if !self.entries.contains_key(&key) {
            if self.entries.len() >= self.limit {
                log::info!("chunk mesh cache full ({} entries), clearing", self.entries.len());
                self.entries.clear();
            }
            let mesh = build_chunk_mesh(key.x, key.z, altitudes);
            self.builds += 1;
            self.entries.insert(key, mesh);
        }
        self.entries.get(&key).unwrap()
    }

    /// Счётчик построек - растёт только на промахах
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn contains(&self, key: ChunkKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_no_rebuild() {
        let mut altitudes = AltitudeCache::new();
        let mut cache = ChunkMeshCache::new();
        let key = ChunkKey::new(2, -3);

        let ptr1 = cache.get_or_build(key, &mut altitudes) as *const MeshData;
        assert_eq!(cache.builds(), 1);
        let ptr2 = cache.get_or_build(key, &mut altitudes) as *const MeshData;
        assert_eq!(cache.builds(), 1, "second call must not rebuild");
        assert_eq!(ptr1, ptr2, "same cached object expected");
    }

    #[test]
    fn test_clear_then_rebuild() {
        let mut altitudes = AltitudeCache::new();
        let mut cache = ChunkMeshCache::with_limit(4);

        for x in 0..4 {
            cache.get_or_build(ChunkKey::new(x, 0), &mut altitudes);
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.builds(), 4);

        // Переполнение: полный сброс, потом перестройка
        cache.get_or_build(ChunkKey::new(9, 9), &mut altitudes);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.builds(), 5);

        cache.get_or_build(ChunkKey::new(0, 0), &mut altitudes);
        assert_eq!(cache.builds(), 6, "evicted chunk must rebuild");
    }
}
