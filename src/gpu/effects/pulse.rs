// ============================================
// Pulse Ring - Кольцо событий взрывов
// ============================================
// Фиксированные 5 слотов, новые в начале, старые молча
// вытесняются. Явного удаления нет: шейдер сам игнорирует
// слоты со стухшим возрастом и сентинел-слоты.

use crate::gpu::core::config::{PULSE_SENTINEL, PULSE_SLOTS};

/// Тип пульса выбирает пресет кольца в шейдере
/// (цвет / скорость / толщина)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PulseKind {
    /// Детонация бомбы
    Bomb,
    /// Гибель корабля
    ShipBlast,
    /// Попадание пули
    Impact,
}

impl PulseKind {
    pub fn as_f32(self) -> f32 {
        match self {
            PulseKind::Bomb => 0.0,
            PulseKind::ShipBlast => 1.0,
            PulseKind::Impact => 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Pulse {
    pub x: f32,
    pub z: f32,
    pub start_time: f32,
    pub kind: PulseKind,
}

/// Слот кольца: явный Empty вместо магического времени
#[derive(Clone, Copy, Debug, Default)]
pub enum PulseSlot {
    #[default]
    Empty,
    Active(Pulse),
}

pub struct PulseRing {
    slots: [PulseSlot; PULSE_SLOTS],
}

impl PulseRing {
    pub fn new() -> Self {
        Self {
            slots: [PulseSlot::Empty; PULSE_SLOTS],
        }
    }

    /// Вставить пульс в начало; самый старый выпадает
    pub fn add(&mut self, x: f32, z: f32, start_time: f32, kind: PulseKind) {
        self.slots.rotate_right(1);
        self.slots[0] = PulseSlot::Active(Pulse {
            x,
            z,
            start_time,
            kind,
        });
    }

    /// Активные пульсы, новые первыми
    pub fn iter(&self) -> impl Iterator<Item = &Pulse> {
        self.slots.iter().filter_map(|s| match s {
            PulseSlot::Active(p) => Some(p),
            PulseSlot::Empty => None,
        })
    }

    /// Упаковка для uniform-буфера: (x, z, start_time, kind),
    /// пустые слоты - сентинел в прошлом, тест возраста в шейдере
    /// для них никогда не срабатывает
    pub fn flatten(&self) -> [[f32; 4]; PULSE_SLOTS] {
        let mut out = [[0.0, 0.0, PULSE_SENTINEL, 0.0]; PULSE_SLOTS];
        for (slot, dst) in self.slots.iter().zip(out.iter_mut()) {
            if let PulseSlot::Active(p) = slot {
                *dst = [p.x, p.z, p.start_time, p.kind.as_f32()];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_overflow_drops_oldest() {
        let mut ring = PulseRing::new();
        for i in 0..6 {
            ring.add(i as f32, 0.0, i as f32, PulseKind::Bomb);
        }
        let xs: Vec<f32> = ring.iter().map(|p| p.x).collect();
        // Ровно 5, новые первыми, нулевой вытеснен
        assert_eq!(xs, vec![5.0, 4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_flatten_sentinel() {
        let mut ring = PulseRing::new();
        ring.add(10.0, -20.0, 1.5, PulseKind::Impact);

        let flat = ring.flatten();
        assert_eq!(flat[0], [10.0, -20.0, 1.5, 2.0]);
        for slot in &flat[1..] {
            assert_eq!(slot[2], PULSE_SENTINEL);
        }
    }
}
