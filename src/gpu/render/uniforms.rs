// ============================================
// Uniforms - Кадровый uniform-буфер
// ============================================
// Один буфер на кадр: матрица, камера, туман, кольцо
// пульсов. Записывается ДО всех draw-вызовов кадра -
// команды исполняются позже записи, и все дро видят
// уже согласованное состояние.

use bytemuck::{Pod, Zeroable};
use ultraviolet::Mat4;

use crate::gpu::core::config::{PULSE_SLOTS, SKY_COLOR};
use crate::gpu::effects::{fog_range, PulseRing};
use crate::gpu::player::Camera;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub time: f32,
    pub sky_color: [f32; 3],
    pub _pad: f32,
    /// (fog_near, fog_far, 0, 0)
    pub fog: [f32; 4],
    /// Слоты пульсов: (x, z, start_time, kind)
    pub pulses: [[f32; 4]; PULSE_SLOTS],
}

impl FrameUniforms {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::identity().into(),
            camera_pos: [0.0, 0.0, 0.0],
            time: 0.0,
            sky_color: SKY_COLOR,
            _pad: 0.0,
            fog: [0.0, 1.0, 0.0, 0.0],
            pulses: PulseRing::new().flatten(),
        }
    }

    pub fn update(&mut self, camera: &Camera, time: f32, view_far: i32, pulses: &PulseRing) {
        self.view_proj = camera.view_projection_matrix().into();
        self.camera_pos = camera.position.into();
        self.time = time;
        let (near, far) = fog_range(view_far);
        self.fog = [near, far, 0.0, 0.0];
        self.pulses = pulses.flatten();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::core::config::{PULSE_SENTINEL, TILE};
    use crate::gpu::effects::PulseKind;

    #[test]
    fn test_layout_is_uniform_friendly() {
        // 64 + 16 + 16 + 16 + 80: кратно 16, без дыр
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 192);
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn test_update_packs_frame_state() {
        let mut uniforms = FrameUniforms::new();
        let camera = Camera::new(16.0 / 9.0);
        let mut pulses = PulseRing::new();
        pulses.add(64.0, -32.0, 2.0, PulseKind::ShipBlast);

        uniforms.update(&camera, 7.5, 24, &pulses);
        assert_eq!(uniforms.time, 7.5);
        assert_eq!(uniforms.fog[1], 24.0 * TILE);
        assert!(uniforms.fog[0] < uniforms.fog[1]);
        assert_eq!(uniforms.pulses[0], [64.0, -32.0, 2.0, 1.0]);
        assert_eq!(uniforms.pulses[4][2], PULSE_SENTINEL);
    }
}
