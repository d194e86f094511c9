// ============================================
// Camera - Камера преследования
// ============================================
// Висит позади и выше корабля, смотрит чуть перед ним.
// Проекция с reversed-Z: дальние объекты получают малую
// глубину, точность f32 у горизонта не рассыпается.

use ultraviolet::{Mat4, Vec3};

use crate::gpu::core::config::{CAMERA_BACK, CAMERA_UP};
use crate::gpu::player::ship::Ship;
use crate::gpu::render::frustum::ViewPoint;

/// Точка прицеливания перед кораблём
const LOOK_AHEAD: f32 = 25.0;

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub aspect: f32,
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 40.0, -60.0),
            target: Vec3::zero(),
            aspect,
            fov_y: 70.0_f32.to_radians(),
            z_near: 0.5,
            z_far: 4000.0,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Пересчитать позицию за кораблём; тангаж наклоняет
    /// точку прицеливания по вертикали
    pub fn follow(&mut self, ship: &Ship) {
        let flat = ship.forward();
        self.position = ship.position - flat * CAMERA_BACK + Vec3::unit_y() * CAMERA_UP;
        self.target =
            ship.position + flat * LOOK_AHEAD + Vec3::unit_y() * (ship.pitch * LOOK_AHEAD * 0.5);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, Vec3::unit_y())
    }

    /// Reversed-Z: near и far переставлены, тест глубины Greater
    pub fn projection_matrix(&self) -> Mat4 {
        ultraviolet::projection::perspective_wgpu_dx(self.fov_y, self.aspect, self.z_far, self.z_near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Точка обзора для отсечения: плоское направление на цель
    pub fn view_point(&self) -> ViewPoint {
        let mut forward = self.target - self.position;
        forward.y = 0.0;
        let forward = if forward.mag_sq() > 1e-6 {
            forward.normalized()
        } else {
            Vec3::unit_z()
        };
        ViewPoint {
            position: self.position,
            forward,
            aspect: self.aspect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_sits_behind_and_above() {
        let mut camera = Camera::new(16.0 / 9.0);
        let ship = Ship::new();
        camera.follow(&ship);
        // Корабль смотрит в +Z, камера сзади (меньший z) и выше
        assert!(camera.position.z < ship.position.z);
        assert!(camera.position.y > ship.position.y);
        assert!(camera.target.z > ship.position.z);
    }

    #[test]
    fn test_view_point_forward_is_flat_unit() {
        let mut camera = Camera::new(2.0);
        let ship = Ship::new();
        camera.follow(&ship);
        let vp = camera.view_point();
        assert_eq!(vp.forward.y, 0.0);
        assert!((vp.forward.mag() - 1.0).abs() < 1e-5);
        assert_eq!(vp.aspect, 2.0);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = Camera::new(1.0);
        camera.resize(800, 0);
        assert_eq!(camera.aspect, 1.0);
        camera.resize(800, 400);
        assert_eq!(camera.aspect, 2.0);
    }
}
