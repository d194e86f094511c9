// ============================================
// Altitude Cache - Кэш высот узлов сетки
// ============================================
// Read-through мемоизация corner_height. Вместо LRU -
// полный сброс при переполнении: пересчёт высоты дешёвый,
// а сброс даёт O(1) амортизированную стоимость.

use std::collections::HashMap;

use crate::gpu::core::config::ALTITUDE_CACHE_LIMIT;
use crate::gpu::terrain::generation::corner_height;

pub struct AltitudeCache {
    entries: HashMap<(i32, i32), f32>,
    limit: usize,
}

impl AltitudeCache {
    pub fn new() -> Self {
        Self::with_limit(ALTITUDE_CACHE_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(1024),
            limit,
        }
    }

    /// Высота узла (tx, tz): из кэша или вычислить и запомнить
    #[inline]
    pub fn corner(&mut self, tx: i32, tz: i32) -> f32 {
        if let Some(&h) = self.entries.get(&(tx, tz)) {
            return h;
        }
        if self.entries.len() >= self.limit {
            log::info!("altitude cache full ({} entries), clearing", self.entries.len());
            self.entries.clear();
        }
        let h = corner_height(tx, tz);
        self.entries.insert((tx, tz), h);
        h
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
    use crate::gpu::terrain::generation::corner_height;

    #[test]
    fn test_memoization_matches_source() {
        let mut cache = AltitudeCache::new();
        for tx in -10..10 {
            for tz in -10..10 {
                assert_eq!(cache.corner(tx, tz), corner_height(tx, tz));
                // Повторный запрос - то же значение
                assert_eq!(cache.corner(tx, tz), corner_height(tx, tz));
            }
        }
        assert_eq!(cache.len(), 400);
    }

    #[test]
    fn test_wholesale_clear() {
        let mut cache = AltitudeCache::with_limit(16);
        for tx in 0..16 {
            cache.corner(tx, 0);
        }
        assert_eq!(cache.len(), 16);
        // Следующий промах сбрасывает весь кэш и вставляет одну запись
        cache.corner(100, 100);
        assert_eq!(cache.len(), 1);
        // Значение после сброса не изменилось
        assert_eq!(cache.corner(0, 0), corner_height(0, 0));
    }
}
