// ============================================
// Config - Константы мира и рендеринга
// ============================================

/// Размер тайла в мировых единицах
pub const TILE: f32 = 8.0;

/// Сторона чанка в тайлах
pub const CHUNK_SIZE: i32 = 16;

/// Уровень моря (мировая высота)
pub const SEA_LEVEL: f32 = 0.0;

/// Высота посадочной площадки
pub const PAD_LEVEL: f32 = 2.0;

/// Границы посадочной площадки в мировых координатах
pub const PAD_MIN_X: f32 = -2.0 * TILE;
pub const PAD_MAX_X: f32 = 2.0 * TILE;
pub const PAD_MIN_Z: f32 = -2.0 * TILE;
pub const PAD_MAX_Z: f32 = 2.0 * TILE;

/// Юбка площадки: тайлы, у которых хотя бы один угол попадает
/// в расширенный прямоугольник, красятся в белый
pub const PAD_SKIRT: f32 = TILE;

/// Дальность видимости в тайлах (меняется в рантайме клавишами +/-)
pub const DEFAULT_VIEW_FAR: i32 = 24;
pub const MIN_VIEW_FAR: i32 = 8;
pub const MAX_VIEW_FAR: i32 = 48;

/// Пороги сброса кэшей
pub const ALTITUDE_CACHE_LIMIT: usize = 10_000;
pub const CHUNK_CACHE_LIMIT: usize = 200;

/// Кольцо пульсов (взрывов)
pub const PULSE_SLOTS: usize = 5;
pub const PULSE_LIFETIME: f32 = 3.0;
/// Сентинел для пустого слота: шейдерный тест возраста никогда не сработает
pub const PULSE_SENTINEL: f32 = -9999.0;

/// Начало тумана как доля от дальней границы
pub const FOG_START_FRAC: f32 = 0.55;

/// Цвет неба (он же цвет тумана)
pub const SKY_COLOR: [f32; 3] = [0.45, 0.55, 0.75];

/// Смещение камеры относительно корабля
pub const CAMERA_BACK: f32 = 40.0;
pub const CAMERA_UP: f32 = 18.0;

/// Проверка: точка внутри прямоугольника площадки
#[inline]
pub fn in_pad(x: f32, z: f32) -> bool {
    x >= PAD_MIN_X && x <= PAD_MAX_X && z >= PAD_MIN_Z && z <= PAD_MAX_Z
}

/// Проверка: точка внутри юбки площадки
#[inline]
pub fn in_pad_skirt(x: f32, z: f32) -> bool {
    x >= PAD_MIN_X - PAD_SKIRT
        && x <= PAD_MAX_X + PAD_SKIRT
        && z >= PAD_MIN_Z - PAD_SKIRT
        && z <= PAD_MAX_Z + PAD_SKIRT
}
