// ============================================
// Chunk Key - Идентификатор чанка
// ============================================

use crate::gpu::core::config::{CHUNK_SIZE, TILE};

/// Ключ чанка: (chunk_x, chunk_z)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ChunkKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkKey {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Центр чанка в мировых координатах (для фрустум-отсечения)
    pub fn center_world(&self) -> (f32, f32) {
        let half = CHUNK_SIZE as f32 * TILE * 0.5;
        (
            self.x as f32 * CHUNK_SIZE as f32 * TILE + half,
            self.z as f32 * CHUNK_SIZE as f32 * TILE + half,
        )
    }
}
