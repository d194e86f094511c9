// ============================================
// GPU Chunk Store - Буферы чанков на GPU
// ============================================
// GPU-резиденция отделена от CPU-кэша мешей: сброс
// CPU-кэша не трогает загруженные буферы, а выпавшие
// из окна чанки выгружаются retain_only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::mesh::MeshData;

pub struct GpuChunk {
    pub key: ChunkKey,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuChunk {
    pub fn new(device: &wgpu::Device, key: ChunkKey, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Chunk {:?} Vertices", key)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("Chunk {:?} Indices", key)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            key,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

pub struct GpuChunkStore {
    chunks: HashMap<ChunkKey, GpuChunk>,
    device: Arc<wgpu::Device>,
}

impl GpuChunkStore {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self {
            chunks: HashMap::with_capacity(256),
            device,
        }
    }

    /// Загрузить чанк, если его ещё нет. Полностью подводные
    /// чанки дают пустой меш и на GPU не попадают.
    pub fn upload_if_missing(&mut self, key: ChunkKey, mesh: &MeshData) {
        if mesh.is_empty() || self.chunks.contains_key(&key) {
            return;
        }
        self.chunks.insert(key, GpuChunk::new(&self.device, key, mesh));
    }

    /// Выгрузить чанки вне текущего окна
    pub fn retain_only(&mut self, valid_keys: &HashSet<ChunkKey>) {
        self.chunks.retain(|key, _| valid_keys.contains(key));
    }

    pub fn get(&self, key: ChunkKey) -> Option<&GpuChunk> {
        self.chunks.get(&key)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }
}
