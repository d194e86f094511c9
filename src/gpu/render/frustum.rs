// ============================================
// Frustum - Асимметричное отсечение по конусу
// ============================================
// Не классический тест по 6 плоскостям: широкая ближняя
// зона "всегда видно" плюс отсечение по расширяющемуся
// вперёд конусу. Запас у камеры намеренно избыточный,
// чтобы элементы не "выскакивали" на краях экрана
// (в том числе на узких сплит-скрин вьюпортах).

use ultraviolet::Vec3;

use crate::gpu::core::config::{CHUNK_SIZE, TILE};
use crate::gpu::terrain::cache::ChunkKey;

/// Чанк считается "сзади", если его центр дальше этого
/// порога против направления взгляда
const CHUNK_BEHIND: f32 = -1.5 * CHUNK_SIZE as f32 * TILE;

/// Ближний запас точечного теста
const POINT_BEHIND: f32 = -5.0 * TILE;

/// Боковой запас у камеры
const NEAR_MARGIN: f32 = 6.0 * TILE;

/// Точка обзора для отсечения: позиция камеры и плоское
/// (y=0) нормированное направление вперёд
#[derive(Clone, Copy, Debug)]
pub struct ViewPoint {
    pub position: Vec3,
    pub forward: Vec3,
    pub aspect: f32,
}

impl ViewPoint {
    pub fn new(position: Vec3, yaw: f32, aspect: f32) -> Self {
        Self {
            position,
            forward: Vec3::new(yaw.sin(), 0.0, yaw.cos()),
            aspect,
        }
    }

    /// Тайл, над которым находится наблюдатель
    pub fn tile(&self) -> (i32, i32) {
        (
            (self.position.x / TILE).floor() as i32,
            (self.position.z / TILE).floor() as i32,
        )
    }
}

/// Дешёвый предварительный тест чанка: проекция центра на
/// направление взгляда. Отсекает чанки строго за камерой ДО
/// обращения к кэшу мешей.
#[inline]
pub fn chunk_ahead(view: &ViewPoint, key: ChunkKey) -> bool {
    let (cx, cz) = key.center_world();
    let dx = cx - view.position.x;
    let dz = cz - view.position.z;
    dx * view.forward.x + dz * view.forward.z >= CHUNK_BEHIND
}

/// Точечный тест для декораций: вперёд с запасом, вбок -
/// полуширина растёт линейно с дистанцией
/// (slope = 0.577*aspect + 0.3)
#[inline]
pub fn in_frustum(view: &ViewPoint, x: f32, z: f32) -> bool {
    let dx = x - view.position.x;
    let dz = z - view.position.z;

    let fwd = dx * view.forward.x + dz * view.forward.z;
    if fwd < POINT_BEHIND {
        return false;
    }

    let lateral = (dx * view.forward.z - dz * view.forward.x).abs();
    let slope = 0.577 * view.aspect + 0.3;
    let half_width = fwd.max(0.0) * slope + NEAR_MARGIN;
    lateral <= half_width
}
