// ============================================
// Ship - Корабль игрока
// ============================================
// Простая модель полёта: постоянная крейсерская скорость,
// рысканье со стрелок, высота плавно подтягивается к
// земле + крейсерскому зазору. Море считается "землёй"
// на нулевой высоте, чтобы корабль не нырял.

use ultraviolet::Vec3;

use crate::gpu::core::config::{PAD_LEVEL, SEA_LEVEL};

/// Зазор над рельефом
const CRUISE_HEIGHT: f32 = 22.0;
/// Радианы в секунду на полном отклонении
const TURN_RATE: f32 = 1.1;
const MIN_SPEED: f32 = 20.0;
const MAX_SPEED: f32 = 140.0;
/// Скорость вертикального выравнивания (1/с)
const CLIMB_RATE: f32 = 2.5;

pub struct Ship {
    pub position: Vec3,
    pub yaw: f32,
    /// Визуальный тангаж из вертикальной скорости
    pub pitch: f32,
    pub speed: f32,
    /// -1..1 со стрелок
    pub yaw_input: f32,
}

impl Ship {
    /// Старт над посадочной площадкой
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, PAD_LEVEL + CRUISE_HEIGHT, -30.0),
            yaw: 0.0,
            pitch: 0.0,
            speed: 60.0,
            yaw_input: 0.0,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn adjust_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Шаг симуляции; `ground` - авторитетная высота рельефа
    pub fn update(&mut self, dt: f32, mut ground: impl FnMut(f32, f32) -> f32) {
        self.yaw += self.yaw_input * TURN_RATE * dt;

        self.position += self.forward() * self.speed * dt;

        let floor = ground(self.position.x, self.position.z).max(SEA_LEVEL);
        let target = floor + CRUISE_HEIGHT;
        let k = (CLIMB_RATE * dt).min(1.0);
        let climb = (target - self.position.y) * k;
        self.position.y += climb;

        if dt > 0.0 {
            self.pitch = (climb / dt / self.speed).clamp(-0.6, 0.6);
        }
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_along_heading() {
        let mut ship = Ship::new();
        let z0 = ship.position.z;
        ship.update(0.1, |_, _| 0.0);
        // yaw=0 смотрит в +Z
        assert!(ship.position.z > z0);
        assert_eq!(ship.position.x, 0.0);
    }

    #[test]
    fn test_turns_with_input() {
        let mut ship = Ship::new();
        ship.yaw_input = 1.0;
        ship.update(0.5, |_, _| 0.0);
        assert!(ship.yaw > 0.0);
    }

    #[test]
    fn test_climbs_over_terrain() {
        let mut ship = Ship::new();
        ship.position.y = 10.0;
        for _ in 0..200 {
            ship.update(0.05, |_, _| 30.0);
        }
        assert!((ship.position.y - (30.0 + CRUISE_HEIGHT)).abs() < 1.0);
    }

    #[test]
    fn test_sea_is_floor() {
        let mut ship = Ship::new();
        for _ in 0..200 {
            ship.update(0.05, |_, _| SEA_LEVEL - 40.0);
        }
        // Над морем держим высоту от нуля, не от дна
        assert!(ship.position.y > SEA_LEVEL + CRUISE_HEIGHT - 1.0);
    }

    #[test]
    fn test_speed_clamped() {
        let mut ship = Ship::new();
        ship.adjust_speed(10_000.0);
        assert_eq!(ship.speed, MAX_SPEED);
        ship.adjust_speed(-10_000.0);
        assert_eq!(ship.speed, MIN_SPEED);
    }
}
