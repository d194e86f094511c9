// ============================================
// Infection - Множество заражённых тайлов
// ============================================
// Владелец состояния заражения. Террейн ничего не знает
// о правилах распространения - он только спрашивает
// принадлежность тайла множеству при сборке оверлея.

use std::collections::HashMap;

use crate::gpu::core::config::{SEA_LEVEL, TILE};
use crate::gpu::terrain::generation::hash2d;

/// Кадры между шагами распространения
const SPREAD_INTERVAL: u64 = 24;
/// Шанс захвата соседа за шаг
const SPREAD_CHANCE: f32 = 0.35;
/// Потолок размера множества
const MAX_TILES: usize = 600;

pub struct InfectedTile {
    /// Кадр появления
    pub born: u64,
}

pub struct InfectedTiles {
    tiles: HashMap<(i32, i32), InfectedTile>,
}

impl InfectedTiles {
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
        }
    }

    /// Начальный очаг в стороне от площадки
    pub fn seeded() -> Self {
        let mut set = Self::new();
        for tx in 10..14 {
            for tz in 14..18 {
                set.insert(tx, tz, 0);
            }
        }
        set
    }

    pub fn insert(&mut self, tx: i32, tz: i32, frame: u64) {
        self.tiles.insert((tx, tz), InfectedTile { born: frame });
    }

    pub fn remove(&mut self, tx: i32, tz: i32) -> bool {
        self.tiles.remove(&(tx, tz)).is_some()
    }

    #[inline]
    pub fn contains(&self, tx: i32, tz: i32) -> bool {
        self.tiles.contains_key(&(tx, tz))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(i32, i32), &InfectedTile)> {
        self.tiles.iter()
    }

    /// Шаг распространения: раз в SPREAD_INTERVAL кадров зараза
    /// пробует перекинуться на соседние сухопутные тайлы. Выбор
    /// детерминирован по координатам и номеру шага, порядок
    /// обхода HashMap на результат не влияет.
    pub fn tick(&mut self, frame: u64, mut ground: impl FnMut(f32, f32) -> f32) {
        if frame == 0 || frame % SPREAD_INTERVAL != 0 || self.tiles.len() >= MAX_TILES {
            return;
        }
        let step = (frame / SPREAD_INTERVAL) as i32;

        let mut next: Vec<(i32, i32)> = Vec::new();
        for &(tx, tz) in self.tiles.keys() {
            for (nx, nz) in [(tx + 1, tz), (tx - 1, tz), (tx, tz + 1), (tx, tz - 1)] {
                if self.contains(nx, nz) {
                    continue;
                }
                if hash2d(nx.wrapping_mul(7).wrapping_add(step), nz.wrapping_mul(5).wrapping_sub(step))
                    > SPREAD_CHANCE
                {
                    continue;
                }
                // Центр тайла, не угол: море заражению не поддаётся
                let cx = (nx as f32 + 0.5) * TILE;
                let cz = (nz as f32 + 0.5) * TILE;
                if ground(cx, cz) <= SEA_LEVEL {
                    continue;
                }
                next.push((nx, nz));
            }
        }

        for (tx, tz) in next {
            if self.tiles.len() >= MAX_TILES {
                break;
            }
            self.insert(tx, tz, frame);
        }
        log::debug!("infection step {}: {} tiles", step, self.tiles.len());
    }
}

impl Default for InfectedTiles {
    fn default() -> Self {
        Self::new()
    }
}
