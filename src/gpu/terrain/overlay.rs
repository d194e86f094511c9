// ============================================
// Infected Overlay - Летучий меш заражения
// ============================================
// Перестраивается с нуля каждый кадр и никогда не
// кэшируется: множество заражённых тайлов меняется
// непрерывно, а стоимость перестройки ограничена
// размером активного окна.

use crate::gpu::core::config::{CHUNK_SIZE, SEA_LEVEL, TILE};
use crate::gpu::terrain::altitude_cache::AltitudeCache;
use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::mesh::MeshData;

/// Подъём над землёй против z-fighting
pub const OVERLAY_LIFT: f32 = 0.5;

/// Крайние точки пульсации цвета
const GLOW_A: [f32; 3] = [0.55, 0.08, 0.45];
const GLOW_B: [f32; 3] = [0.95, 0.25, 0.85];

/// Цвет заражённого тайла: синус со сдвигом фазы по
/// координатам тайла, умноженный на фактор высоты -
/// в низинах свечение ярче ("стекает" в долины)
pub fn overlay_color(frame_count: u64, tx: i32, tz: i32, avg_height: f32) -> [f32; 3] {
    let phase = (frame_count as f32 * 0.08 + tx as f32 * 0.5 + tz as f32 * 0.3).sin();
    let t = 0.5 + 0.5 * phase;
    let intensity = (1.0 - (avg_height - SEA_LEVEL) * 0.04).clamp(0.55, 1.0);
    [
        (GLOW_A[0] + (GLOW_B[0] - GLOW_A[0]) * t) * intensity,
        (GLOW_A[1] + (GLOW_B[1] - GLOW_A[1]) * t) * intensity,
        (GLOW_A[2] + (GLOW_B[2] - GLOW_A[2]) * t) * intensity,
    ]
}

/// Построить оверлей по всем заражённым тайлам активного окна.
/// `window` - включительные границы окна в чанках.
pub fn build_infected_overlay(
    frame_count: u64,
    window: (ChunkKey, ChunkKey),
    is_infected: impl Fn(i32, i32) -> bool,
    altitudes: &mut AltitudeCache,
) -> MeshData {
    let mut mesh = MeshData::new();
    let (min, max) = window;

    let tx_min = min.x * CHUNK_SIZE;
    let tx_max = (max.x + 1) * CHUNK_SIZE - 1;
    let tz_min = min.z * CHUNK_SIZE;
    let tz_max = (max.z + 1) * CHUNK_SIZE - 1;

    for tz in tz_min..=tz_max {
        for tx in tx_min..=tx_max {
            if !is_infected(tx, tz) {
                continue;
            }

            let h00 = altitudes.corner(tx, tz) + OVERLAY_LIFT;
            let h10 = altitudes.corner(tx + 1, tz) + OVERLAY_LIFT;
            let h01 = altitudes.corner(tx, tz + 1) + OVERLAY_LIFT;
            let h11 = altitudes.corner(tx + 1, tz + 1) + OVERLAY_LIFT;
            let avg = (h00 + h10 + h01 + h11) * 0.25 - OVERLAY_LIFT;

            mesh.push_tile_quad(
                tx as f32 * TILE,
                tz as f32 * TILE,
                (tx + 1) as f32 * TILE,
                (tz + 1) as f32 * TILE,
                [h00, h10, h01, h11],
                overlay_color(frame_count, tx, tz, avg),
            );
        }
    }

    mesh
}
