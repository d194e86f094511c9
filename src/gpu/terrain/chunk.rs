// ============================================
// Chunk Builder - Статичный меш чанка
// ============================================
// Чанк = CHUNK_SIZE x CHUNK_SIZE тайлов, два треугольника
// на тайл. Содержимое зависит только от высот и статичной
// классификации площадка/море, поэтому меш кэшируется на
// всё время процесса.

use crate::gpu::core::config::{in_pad_skirt, CHUNK_SIZE, SEA_LEVEL, TILE};
use crate::gpu::terrain::altitude_cache::AltitudeCache;
use crate::gpu::terrain::generation::hash2d;
use crate::gpu::terrain::mesh::MeshData;

/// Пляжная полоса над уровнем моря
const BEACH_BAND: f32 = 1.5;

/// Белый цвет юбки площадки
const PAD_COLOR: [f32; 3] = [0.92, 0.92, 0.95];

const SAND_PALETTE: [[f32; 3]; 3] = [
    [0.80, 0.74, 0.55],
    [0.76, 0.70, 0.50],
    [0.84, 0.78, 0.60],
];

const LAND_PALETTE: [[f32; 3]; 4] = [
    [0.22, 0.55, 0.18],
    [0.18, 0.50, 0.22],
    [0.26, 0.58, 0.16],
    [0.20, 0.52, 0.26],
];

/// Затемнение шахматной клетки
const CHECKER_DARKEN: f32 = 0.85;

/// Построить меш чанка (cx, cz). Полностью затопленный чанк
/// даёт валидный пустой меш, не ошибку.
pub fn build_chunk_mesh(cx: i32, cz: i32, altitudes: &mut AltitudeCache) -> MeshData {
    let mut mesh = MeshData::new();
    let base_tx = cx * CHUNK_SIZE;
    let base_tz = cz * CHUNK_SIZE;

    for lz in 0..CHUNK_SIZE {
        for lx in 0..CHUNK_SIZE {
            let tx = base_tx + lx;
            let tz = base_tz + lz;

            let h00 = altitudes.corner(tx, tz);
            let h10 = altitudes.corner(tx + 1, tz);
            let h01 = altitudes.corner(tx, tz + 1);
            let h11 = altitudes.corner(tx + 1, tz + 1);

            // Тайл целиком под водой - море рисуется отдельным квадом
            if tile_submerged([h00, h10, h01, h11]) {
                continue;
            }

            let color = tile_color(tx, tz, [h00, h10, h01, h11]);
            mesh.push_tile_quad(
                tx as f32 * TILE,
                tz as f32 * TILE,
                (tx + 1) as f32 * TILE,
                (tz + 1) as f32 * TILE,
                [h00, h10, h01, h11],
                color,
            );
        }
    }

    mesh
}

/// Тайл затоплен, если даже самый высокий угол ниже уровня моря
#[inline]
pub fn tile_submerged(heights: [f32; 4]) -> bool {
    let max = heights[0].max(heights[1]).max(heights[2]).max(heights[3]);
    max < SEA_LEVEL
}

/// Базовый цвет тайла: юбка площадки - белый, иначе пляж/земля
/// по средней высоте, плюс шахматное затемнение 15% по (tx+tz)
pub fn tile_color(tx: i32, tz: i32, heights: [f32; 4]) -> [f32; 3] {
    let mut color = if skirt_corner(tx, tz) {
        PAD_COLOR
    } else {
        let avg = (heights[0] + heights[1] + heights[2] + heights[3]) * 0.25;
        let palette: &[[f32; 3]] = if avg < SEA_LEVEL + BEACH_BAND {
            &SAND_PALETTE
        } else {
            &LAND_PALETTE
        };
        let idx = (hash2d(tx, tz) * palette.len() as f32) as usize % palette.len();
        palette[idx]
    };

    if (tx + tz) & 1 != 0 {
        color = [
            color[0] * CHECKER_DARKEN,
            color[1] * CHECKER_DARKEN,
            color[2] * CHECKER_DARKEN,
        ];
    }
    color
}

/// Хотя бы один из четырёх углов тайла лежит в юбке площадки
#[inline]
fn skirt_corner(tx: i32, tz: i32) -> bool {
    let x0 = tx as f32 * TILE;
    let z0 = tz as f32 * TILE;
    let x1 = (tx + 1) as f32 * TILE;
    let z1 = (tz + 1) as f32 * TILE;
    in_pad_skirt(x0, z0) || in_pad_skirt(x1, z0) || in_pad_skirt(x0, z1) || in_pad_skirt(x1, z1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::terrain::altitude_cache::AltitudeCache;

    #[test]
    fn test_submerged_tiles_skipped() {
        let mut altitudes = AltitudeCache::new();
        for (cx, cz) in [(0, 0), (-1, -1), (7, -3)] {
            let mesh = build_chunk_mesh(cx, cz, &mut altitudes);

            // Считаем удержанные тайлы вручную и сверяем с мешем
            let mut kept = 0;
            for lz in 0..CHUNK_SIZE {
                for lx in 0..CHUNK_SIZE {
                    let tx = cx * CHUNK_SIZE + lx;
                    let tz = cz * CHUNK_SIZE + lz;
                    let heights = [
                        altitudes.corner(tx, tz),
                        altitudes.corner(tx + 1, tz),
                        altitudes.corner(tx, tz + 1),
                        altitudes.corner(tx + 1, tz + 1),
                    ];
                    if !tile_submerged(heights) {
                        kept += 1;
                    }
                }
            }
            assert_eq!(mesh.triangle_count(), kept * 2);
        }
    }

    #[test]
    fn test_pad_chunk_has_white_tiles() {
        let mut altitudes = AltitudeCache::new();
        let mesh = build_chunk_mesh(0, 0, &mut altitudes);
        let has_pad_color = mesh.vertices.iter().any(|v| {
            v.color == PAD_COLOR
                || v.color
                    == [
                        PAD_COLOR[0] * CHECKER_DARKEN,
                        PAD_COLOR[1] * CHECKER_DARKEN,
                        PAD_COLOR[2] * CHECKER_DARKEN,
                    ]
        });
        assert!(has_pad_color, "chunk over the pad must contain white tiles");
    }

    #[test]
    fn test_checkerboard_parity() {
        let heights = [5.0, 5.0, 5.0, 5.0];
        let close = |a: [f32; 3], b: [f32; 3]| {
            a.iter().zip(b).all(|(x, y)| (*x - y).abs() < 1e-6)
        };
        // Чётный тайл - цвет прямо из палитры, нечётный - затемнён на 15%
        let even = tile_color(100, 100, heights);
        assert!(LAND_PALETTE.iter().any(|p| close(even, *p)));

        let odd = tile_color(100, 101, heights);
        let darkened = |p: &[f32; 3]| {
            [
                p[0] * CHECKER_DARKEN,
                p[1] * CHECKER_DARKEN,
                p[2] * CHECKER_DARKEN,
            ]
        };
        assert!(LAND_PALETTE.iter().any(|p| close(odd, darkened(p))));
    }
}
