// ============================================
// Terrain - Потоковая выдача чанков вокруг камеры
// ============================================
// Центральный компонент террейна: владеет кэшем высот,
// кэшем мешей и кольцом пульсов. Активное окно чанков
// считается заново при каждом обходе - хранимого
// состояния "текущего окна" нет, поэтому смена дальности
// видимости между кадрами не требует инвалидации.

use crate::gpu::core::config::{CHUNK_SIZE, PAD_LEVEL, TILE, in_pad};
use crate::gpu::effects::{PulseKind, PulseRing};
use crate::gpu::render::frustum::{ViewPoint, chunk_ahead};
use crate::gpu::terrain::altitude_cache::AltitudeCache;
use crate::gpu::terrain::cache::{ChunkKey, ChunkMeshCache};
use crate::gpu::terrain::generation::interpolate_quad;
use crate::gpu::terrain::mesh::MeshData;
use crate::gpu::terrain::overlay::build_infected_overlay;

pub struct Terrain {
    altitudes: AltitudeCache,
    meshes: ChunkMeshCache,
    pulses: PulseRing,
}

impl Terrain {
    pub fn new() -> Self {
        Self {
            altitudes: AltitudeCache::new(),
            meshes: ChunkMeshCache::new(),
            pulses: PulseRing::new(),
        }
    }

    /// Авторитетная высота земли в мировой точке. Та же
    /// билинейная интерполяция с расщеплением по диагонали,
    /// что и в геометрии чанков: физика и меш не расходятся.
    pub fn altitude(&mut self, x: f32, z: f32) -> f32 {
        if in_pad(x, z) {
            return PAD_LEVEL;
        }

        let gx = (x / TILE).floor();
        let gz = (z / TILE).floor();
        let tx = gx as i32;
        let tz = gz as i32;
        let fx = x / TILE - gx;
        let fz = z / TILE - gz;

        let h00 = self.altitudes.corner(tx, tz);
        let h10 = self.altitudes.corner(tx + 1, tz);
        let h01 = self.altitudes.corner(tx, tz + 1);
        let h11 = self.altitudes.corner(tx + 1, tz + 1);
        interpolate_quad(fx, fz, h00, h10, h01, h11)
    }

    /// Высота угла сетки (через кэш)
    pub fn corner(&mut self, tx: i32, tz: i32) -> f32 {
        self.altitudes.corner(tx, tz)
    }

    /// Зарегистрировать взрыв для шейдерного кольца
    pub fn add_pulse(&mut self, x: f32, z: f32, now: f32, kind: PulseKind) {
        log::debug!("pulse {:?} at ({:.0}, {:.0})", kind, x, z);
        self.pulses.add(x, z, now, kind);
    }

    pub fn pulses(&self) -> &PulseRing {
        &self.pulses
    }

    /// Включительные границы активного окна в чанках:
    /// квадрат +-view_far тайлов вокруг тайла наблюдателя
    pub fn chunk_window(view_tile: (i32, i32), view_far: i32) -> (ChunkKey, ChunkKey) {
        let (gx, gz) = view_tile;
        (
            ChunkKey::new(
                (gx - view_far).div_euclid(CHUNK_SIZE),
                (gz - view_far).div_euclid(CHUNK_SIZE),
            ),
            ChunkKey::new(
                (gx + view_far).div_euclid(CHUNK_SIZE),
                (gz + view_far).div_euclid(CHUNK_SIZE),
            ),
        )
    }

    /// Обойти видимые чанки окна: предварительный тест
    /// "не за камерой" стоит ДО обращения к кэшу, так что
    /// чанки за спиной не строятся и не занимают слоты.
    pub fn for_each_visible_chunk(
        &mut self,
        view: &ViewPoint,
        view_far: i32,
        mut f: impl FnMut(ChunkKey, &MeshData),
    ) {
        let (min, max) = Self::chunk_window(view.tile(), view_far);
        for cz in min.z..=max.z {
            for cx in min.x..=max.x {
                let key = ChunkKey::new(cx, cz);
                if !chunk_ahead(view, key) {
                    continue;
                }
                let mesh = self.meshes.get_or_build(key, &mut self.altitudes);
                f(key, mesh);
            }
        }
    }

    /// Оверлей заражения по текущему окну, свежий каждый кадр
    pub fn infected_overlay(
        &mut self,
        frame_count: u64,
        view: &ViewPoint,
        view_far: i32,
        is_infected: impl Fn(i32, i32) -> bool,
    ) -> MeshData {
        let window = Self::chunk_window(view.tile(), view_far);
        build_infected_overlay(frame_count, window, is_infected, &mut self.altitudes)
    }

    /// (угловых высот, чанков, всего сборок чанков)
    pub fn cache_stats(&self) -> (usize, usize, u64) {
        (self.altitudes.len(), self.meshes.len(), self.meshes.builds())
    }

    /// Полный сброс кэшей (смена мира)
    pub fn clear_caches(&mut self) {
        self.altitudes.clear();
        self.meshes.clear();
    }

    #[cfg(test)]
    fn has_chunk(&self, key: ChunkKey) -> bool {
        self.meshes.contains(key)
    }
}

impl Default for Terrain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::core::config::{PAD_MIN_X, PAD_MIN_Z};
    use crate::gpu::terrain::generation::altitude as direct_altitude;
    use std::collections::HashSet;
    use ultraviolet::Vec3;

    fn view_at_origin() -> ViewPoint {
        ViewPoint::new(Vec3::new(0.0, 30.0, 0.0), 0.0, 16.0 / 9.0)
    }

    #[test]
    fn test_window_covers_expected_chunks() {
        // Наблюдатель на тайле (0,0), дальность 10 тайлов:
        // окно чанков ровно [-1..0] x [-1..0]
        let (min, max) = Terrain::chunk_window((0, 0), 10);
        assert_eq!((min.x, min.z), (-1, -1));
        assert_eq!((max.x, max.z), (0, 0));

        let mut terrain = Terrain::new();
        let mut keys = HashSet::new();
        terrain.for_each_visible_chunk(&view_at_origin(), 10, |key, _| {
            keys.insert(key);
        });
        assert_eq!(keys.len(), 4);
        for key in &keys {
            assert!((-1..=0).contains(&key.x) && (-1..=0).contains(&key.z));
        }

        // Чанк за пределами окна никогда не строился
        assert!(!terrain.has_chunk(ChunkKey::new(5, 0)));
        let (_, _, builds) = terrain.cache_stats();
        assert_eq!(builds, 4);
    }

    #[test]
    fn test_chunks_behind_camera_not_built() {
        // Широкое окно: задние ряды отсекаются до кэша
        let mut terrain = Terrain::new();
        let mut keys = HashSet::new();
        terrain.for_each_visible_chunk(&view_at_origin(), 48, |key, _| {
            keys.insert(key);
        });

        let (min, max) = Terrain::chunk_window((0, 0), 48);
        assert_eq!((min.z, max.z), (-3, 3));
        // Центр ряда cz=-3 лежит глубже порога -1.5 чанка
        for cx in min.x..=max.x {
            let key = ChunkKey::new(cx, -3);
            assert!(!keys.contains(&key));
            assert!(!terrain.has_chunk(key), "rear chunk must never be built");
        }
        // Передние ряды на месте
        assert!(keys.contains(&ChunkKey::new(0, 3)));
    }

    #[test]
    fn test_revisit_hits_cache() {
        let mut terrain = Terrain::new();
        let view = view_at_origin();
        terrain.for_each_visible_chunk(&view, 10, |_, _| {});
        let (_, cached, builds) = terrain.cache_stats();
        terrain.for_each_visible_chunk(&view, 10, |_, _| {});
        let (_, cached2, builds2) = terrain.cache_stats();
        assert_eq!(builds2, builds, "second pass must be all cache hits");
        assert_eq!(cached2, cached);
    }

    #[test]
    fn test_view_far_change_between_frames() {
        // Дальность меняется на лету, окно просто пересчитывается
        let mut terrain = Terrain::new();
        let view = view_at_origin();
        let mut narrow = HashSet::new();
        terrain.for_each_visible_chunk(&view, 10, |key, _| {
            narrow.insert(key);
        });
        let mut wide = HashSet::new();
        terrain.for_each_visible_chunk(&view, 24, |key, _| {
            wide.insert(key);
        });
        assert!(wide.len() > narrow.len());
        assert!(narrow.iter().all(|k| wide.contains(k)));
    }

    #[test]
    fn test_altitude_matches_uncached_path() {
        let mut terrain = Terrain::new();
        for (x, z) in [(37.3, -81.9), (4.0, 4.0), (-200.5, 613.2)] {
            let cached = terrain.altitude(x, z);
            assert!((cached - direct_altitude(x, z)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_altitude_flat_on_pad() {
        let mut terrain = Terrain::new();
        assert_eq!(terrain.altitude(0.0, 0.0), PAD_LEVEL);
        assert_eq!(terrain.altitude(PAD_MIN_X + 0.1, PAD_MIN_Z + 0.1), PAD_LEVEL);
    }

    #[test]
    fn test_clear_resets_stats() {
        let mut terrain = Terrain::new();
        terrain.for_each_visible_chunk(&view_at_origin(), 10, |_, _| {});
        terrain.clear_caches();
        let (alts, chunks, _) = terrain.cache_stats();
        assert_eq!((alts, chunks), (0, 0));
    }
}
