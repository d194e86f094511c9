// ============================================
// Resources - Общие ресурсы игры
// ============================================

use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

use crate::gpu::core::config::DEFAULT_VIEW_FAR;
use crate::gpu::player::{Camera, Ship};
use crate::gpu::render::Renderer;
use crate::gpu::terrain::Terrain;
use crate::gpu::world::{DecorRegistry, InfectedTiles};

/// Все игровые ресурсы в одном месте
pub struct GameResources {
    // Window & Rendering
    pub window: Option<Arc<Window>>,
    pub renderer: Option<Renderer>,

    // Player
    pub ship: Ship,
    pub camera: Camera,

    // World
    pub terrain: Terrain,
    pub infection: InfectedTiles,
    pub decor: DecorRegistry,

    // Runtime state
    pub view_far: i32,
    pub frame_count: u64,
    /// Space циклически перебирает типы пульсов
    pub pulse_cycle: u8,

    // Timing
    pub start_time: Instant,
    pub last_frame: Instant,
}

impl GameResources {
    pub fn new() -> Self {
        let mut terrain = Terrain::new();
        let decor = DecorRegistry::generate(&mut terrain);
        let now = Instant::now();

        Self {
            window: None,
            renderer: None,
            ship: Ship::new(),
            camera: Camera::new(16.0 / 9.0),
            terrain,
            infection: InfectedTiles::seeded(),
            decor,
            view_far: DEFAULT_VIEW_FAR,
            frame_count: 0,
            pulse_cycle: 0,
            start_time: now,
            last_frame: now,
        }
    }
}

impl Default for GameResources {
    fn default() -> Self {
        Self::new()
    }
}
