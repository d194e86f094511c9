// ============================================
// App - Главный обработчик приложения
// ============================================

use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::gpu::core::config::{MAX_VIEW_FAR, MIN_VIEW_FAR};
use crate::gpu::core::GameResources;
use crate::gpu::effects::PulseKind;
use crate::gpu::render::Renderer;

/// Главное приложение
pub struct App {
    resources: GameResources,
}

impl App {
    pub fn new() -> Self {
        Self {
            resources: GameResources::new(),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, keycode: KeyCode, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        let res = &mut self.resources;

        match keycode {
            KeyCode::Escape if pressed => event_loop.exit(),

            KeyCode::ArrowLeft => {
                res.ship.yaw_input = if pressed { -1.0 } else { 0.0 };
            }
            KeyCode::ArrowRight => {
                res.ship.yaw_input = if pressed { 1.0 } else { 0.0 };
            }
            KeyCode::ArrowUp if pressed => res.ship.adjust_speed(10.0),
            KeyCode::ArrowDown if pressed => res.ship.adjust_speed(-10.0),

            // Взрыв под кораблём, тип по циклу
            KeyCode::Space if pressed => {
                let kind = match res.pulse_cycle % 3 {
                    0 => PulseKind::Bomb,
                    1 => PulseKind::ShipBlast,
                    _ => PulseKind::Impact,
                };
                res.pulse_cycle = res.pulse_cycle.wrapping_add(1);
                let now = (Instant::now() - res.start_time).as_secs_f32();
                res.terrain
                    .add_pulse(res.ship.position.x, res.ship.position.z, now, kind);
            }

            KeyCode::Equal | KeyCode::NumpadAdd if pressed => {
                res.view_far = (res.view_far + 4).min(MAX_VIEW_FAR);
                log::info!("view distance: {} tiles", res.view_far);
            }
            KeyCode::Minus | KeyCode::NumpadSubtract if pressed => {
                res.view_far = (res.view_far - 4).max(MIN_VIEW_FAR);
                log::info!("view distance: {} tiles", res.view_far);
            }

            _ => {}
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.resources.last_frame).as_secs_f32().min(0.1);
        self.resources.last_frame = now;
        let time = (now - self.resources.start_time).as_secs_f32();

        let GameResources {
            ship,
            camera,
            terrain,
            infection,
            decor,
            renderer,
            frame_count,
            view_far,
            window,
            ..
        } = &mut self.resources;

        ship.update(dt, |x, z| terrain.altitude(x, z));
        infection.tick(*frame_count, |x, z| terrain.altitude(x, z));
        camera.follow(ship);

        if let Some(renderer) = renderer {
            renderer.update(camera, terrain, infection, decor, time, *frame_count, *view_far);
            match renderer.render() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = renderer.size;
                    renderer.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("surface error: {:?}", e),
            }
        }

        *frame_count += 1;

        if let Some(window) = window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.resources.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("Plaguewing - procedural terrain flight")
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

            let renderer = Renderer::new(Arc::clone(&window));
            let size = window.inner_size();
            self.resources.camera.resize(size.width, size.height);
            self.resources.renderer = Some(renderer);
            self.resources.window = Some(window);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.resources.renderer {
                    renderer.resize(physical_size);
                }
                self.resources
                    .camera
                    .resize(physical_size.width, physical_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(keycode),
                        state,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, keycode, state),

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.resources.window {
            window.request_redraw();
        }
    }
}

/// Запуск игры
pub fn run() {
    env_logger::init();

    println!("=== Controls ===");
    println!("Left/Right - Turn");
    println!("Up/Down - Speed");
    println!("Space - Drop a pulse (cycles bomb/blast/impact)");
    println!("+/- - View distance");
    println!("Escape - Quit");
    println!("================");

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).unwrap();
}
