// ============================================
// Fog - Дистанционный туман
// ============================================
// Одна формула на два пути: uniform-протокол шейдера и
// CPU-подмешивание для декораций, которые рисуются мимо
// terrain-пайплайна. Формула обязана побитово совпадать
// с smoothstep в WGSL, иначе деревья "выпадут" из тумана.

use crate::gpu::core::config::{FOG_START_FRAC, TILE};

/// Границы тумана из дальности видимости (в тайлах)
#[inline]
pub fn fog_range(view_far: i32) -> (f32, f32) {
    let far = view_far as f32 * TILE;
    (far * FOG_START_FRAC, far)
}

/// Полоса тумана: clamp + кубическое сглаживание,
/// семантика smoothstep(near, far, depth)
#[inline]
pub fn fog_band(depth: f32, near: f32, far: f32) -> f32 {
    let t = ((depth - near) / (far - near)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// CPU-аналог туманного слагаемого шейдера: линейное
/// подмешивание цвета неба по той же полосе
#[inline]
pub fn fog_blend(color: [f32; 3], depth: f32, near: f32, far: f32, sky: [f32; 3]) -> [f32; 3] {
    let f = fog_band(depth, near, far);
    [
        color[0] + (sky[0] - color[0]) * f,
        color[1] + (sky[1] - color[1]) * f,
        color[2] + (sky[2] - color[2]) * f,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_clamps() {
        assert_eq!(fog_band(-100.0, 50.0, 150.0), 0.0);
        assert_eq!(fog_band(0.0, 50.0, 150.0), 0.0);
        assert_eq!(fog_band(150.0, 50.0, 150.0), 1.0);
        assert_eq!(fog_band(9999.0, 50.0, 150.0), 1.0);
    }

    #[test]
    fn test_band_is_cubic_not_linear() {
        // В середине полосы smoothstep = 0.5, но на четверти - не 0.25
        assert!((fog_band(100.0, 50.0, 150.0) - 0.5).abs() < 1e-6);
        let quarter = fog_band(75.0, 50.0, 150.0);
        assert!((quarter - 0.15625).abs() < 1e-6, "expected cubic ease, got {}", quarter);
    }

    #[test]
    fn test_blend_endpoints() {
        let sky = [0.4, 0.5, 0.7];
        let c = [1.0, 0.0, 0.0];
        assert_eq!(fog_blend(c, 0.0, 50.0, 150.0, sky), c);
        let far = fog_blend(c, 500.0, 50.0, 150.0, sky);
        for (a, b) in far.iter().zip(sky) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_range_follows_view_far() {
        let (near, far) = fog_range(10);
        assert_eq!(far, 10.0 * TILE);
        assert!(near < far);
        let (_, far2) = fog_range(20);
        assert!(far2 > far, "fog must widen with view distance");
    }
}
