// ============================================
// Height Field - Детерминированная карта высот
// ============================================
// Единственный источник истины о высоте земли.
// Чистая функция: один вход - всегда один выход,
// поэтому кэширование не требует инвалидации.

use crate::gpu::core::config::{in_pad, PAD_LEVEL, TILE};

use super::noise::fbm2d;

/// Частота базовой октавы шума (в координатах тайлов)
const BASE_FREQ: f32 = 0.045;

/// Высота гребней между кратерами
const HILL_TOP: f32 = 10.0;

/// Глубина парабола-кратеров
const CRATER_DEPTH: f32 = 26.0;

/// Сырая высота в узле сетки (tx, tz) без учёта площадки.
/// Три октавы когерентного шума, затем парабола вниз:
/// чем больше |шум|, тем глубже впадина - получаются кратеры
/// и долины вместо простых холмов.
#[inline]
pub fn grid_sample(tx: i32, tz: i32) -> f32 {
    let n = fbm2d(tx as f32 * BASE_FREQ, tz as f32 * BASE_FREQ, 3);
    let c = n * 2.0 - 1.0;
    HILL_TOP - CRATER_DEPTH * c * c
}

/// Высота в узле сетки с учётом площадки: углы внутри
/// прямоугольника площадки принудительно плоские, отсюда
/// появляется "юбка" из соседних тайлов
#[inline]
pub fn corner_height(tx: i32, tz: i32) -> f32 {
    let wx = tx as f32 * TILE;
    let wz = tz as f32 * TILE;
    if in_pad(wx, wz) {
        PAD_LEVEL
    } else {
        grid_sample(tx, tz)
    }
}

/// Интерполяция внутри квада по двум треугольникам.
/// Диагональ идёт от (1,0) к (0,1); выбор треугольника по
/// fx+fz <= 1 устраняет разрыв интерполяции через диагональ.
#[inline]
pub fn interpolate_quad(fx: f32, fz: f32, h00: f32, h10: f32, h01: f32, h11: f32) -> f32 {
    if fx + fz <= 1.0 {
        h00 + (h10 - h00) * fx + (h01 - h00) * fz
    } else {
        h11 + (h01 - h11) * (1.0 - fx) + (h10 - h11) * (1.0 - fz)
    }
}

/// Высота в произвольной мировой точке (без кэша).
/// Горячий путь идёт через Terrain::altitude с кэшем углов.
pub fn altitude(x: f32, z: f32) -> f32 {
    if in_pad(x, z) {
        return PAD_LEVEL;
    }

    let gx = (x / TILE).floor();
    let gz = (z / TILE).floor();
    let tx = gx as i32;
    let tz = gz as i32;
    let fx = x / TILE - gx;
    let fz = z / TILE - gz;

    let h00 = corner_height(tx, tz);
    let h10 = corner_height(tx + 1, tz);
    let h01 = corner_height(tx, tz + 1);
    let h11 = corner_height(tx + 1, tz + 1);

    interpolate_quad(fx, fz, h00, h10, h01, h11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_deterministic() {
        for (x, z) in [(123.4, -567.8), (0.1, 0.1), (-4096.0, 8191.5)] {
            assert_eq!(altitude(x, z).to_bits(), altitude(x, z).to_bits());
        }
    }

    #[test]
    fn test_pad_is_flat() {
        // Вся площадка строго на PAD_LEVEL, независимо от шума
        for i in 0..=16 {
            for j in 0..=16 {
                let x = -16.0 + i as f32 * 2.0;
                let z = -16.0 + j as f32 * 2.0;
                assert_eq!(altitude(x, z), PAD_LEVEL);
            }
        }
    }

    #[test]
    fn test_diagonal_continuity() {
        // На диагонали fx+fz = 1 оба треугольника дают одно значение
        for (tx, tz) in [(5, 7), (-3, 11), (100, -250)] {
            let h00 = corner_height(tx, tz);
            let h10 = corner_height(tx + 1, tz);
            let h01 = corner_height(tx, tz + 1);
            let h11 = corner_height(tx + 1, tz + 1);

            for step in 1..10 {
                let fx = step as f32 / 10.0;
                let fz = 1.0 - fx;
                let a = h00 + (h10 - h00) * fx + (h01 - h00) * fz;
                let b = h11 + (h01 - h11) * (1.0 - fx) + (h10 - h11) * (1.0 - fz);
                assert!((a - b).abs() < 1e-4, "seam at fx={}: {} vs {}", fx, a, b);
            }
        }
    }

    #[test]
    fn test_crater_profile() {
        // Парабола вниз: высота никогда не превышает вершину гребня
        for tx in -40..40 {
            for tz in -40..40 {
                assert!(grid_sample(tx, tz) <= HILL_TOP);
            }
        }
    }
}
