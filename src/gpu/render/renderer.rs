// ============================================
// Renderer - Состояние GPU и кадр
// ============================================
// Порядок кадра жёсткий: сначала запись uniform-буфера,
// потом стриминг чанков и загрузка на GPU, потом draw.
// Команды исполняются после submit, поэтому все дро
// кадра видят одно согласованное состояние uniform'ов.

use std::collections::HashSet;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::gpu::core::config::{CHUNK_SIZE, SEA_LEVEL, SKY_COLOR, TILE};
use crate::gpu::player::Camera;
use crate::gpu::render::depth::create_depth_texture;
use crate::gpu::render::gpu_chunks::GpuChunkStore;
use crate::gpu::render::pipelines::Pipelines;
use crate::gpu::render::uniforms::FrameUniforms;
use crate::gpu::terrain::cache::ChunkKey;
use crate::gpu::terrain::mesh::MeshData;
use crate::gpu::terrain::Terrain;
use crate::gpu::world::{DecorRegistry, InfectedTiles};

const SEA_COLOR: [f32; 3] = [0.13, 0.30, 0.52];

/// Временный меш кадра (оверлей, декорации, море):
/// пересоздаётся целиком, буферы прошлого кадра дропаются
struct TransientMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl TransientMesh {
    fn build(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,

    depth_texture: wgpu::TextureView,
    pipelines: Pipelines,
    uniforms: FrameUniforms,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    gpu_chunks: GpuChunkStore,
    /// Чанки текущего кадра в порядке обхода окна
    visible: Vec<ChunkKey>,
    overlay: Option<TransientMesh>,
    decor: Option<TransientMesh>,
    sea: Option<TransientMesh>,
}

/// Инициализация GPU устройства и surface
async fn init_gpu(
    window: Arc<Window>,
) -> (
    wgpu::Surface<'static>,
    Arc<wgpu::Device>,
    Arc<wgpu::Queue>,
    wgpu::SurfaceConfiguration,
    winit::dpi::PhysicalSize<u32>,
) {
    let size = window.inner_size();
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let surface = instance.create_surface(window).unwrap();
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .unwrap();

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("GPU Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .unwrap();

    let device = Arc::new(device);
    let queue = Arc::new(queue);

    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .copied()
        .unwrap_or(surface_caps.formats[0]);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format: surface_format,
        width: size.width,
        height: size.height,
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: surface_caps.alpha_modes[0],
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(&device, &config);

    (surface, device, queue, config, size)
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Self {
        let (surface, device, queue, config, size) = pollster::block_on(init_gpu(window));

        let depth_texture = create_depth_texture(&device, &config);

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Uniform Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniforms = FrameUniforms::new();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform BG"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipelines = Pipelines::new(&device, config.format, &uniform_layout);
        let gpu_chunks = GpuChunkStore::new(Arc::clone(&device));

        log::info!("renderer ready: {:?}, {}x{}", config.format, size.width, size.height);

        Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_texture,
            pipelines,
            uniforms,
            uniform_buffer,
            uniform_bind_group,
            gpu_chunks,
            visible: Vec::new(),
            overlay: None,
            decor: None,
            sea: None,
        }
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, &self.config);
    }

    /// Подготовка кадра: uniform'ы пишутся до стриминга и дро
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        camera: &Camera,
        terrain: &mut Terrain,
        infection: &InfectedTiles,
        decor: &DecorRegistry,
        time: f32,
        frame_count: u64,
        view_far: i32,
    ) {
        self.uniforms.update(camera, time, view_far, terrain.pulses());
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[self.uniforms]));

        let view = camera.view_point();

        // Стриминг: обход окна, загрузка недостающего на GPU
        self.visible.clear();
        let store = &mut self.gpu_chunks;
        let visible = &mut self.visible;
        terrain.for_each_visible_chunk(&view, view_far, |key, mesh| {
            store.upload_if_missing(key, mesh);
            visible.push(key);
        });
        let valid: HashSet<ChunkKey> = self.visible.iter().copied().collect();
        self.gpu_chunks.retain_only(&valid);

        // Временные меши кадра
        let overlay = terrain.infected_overlay(frame_count, &view, view_far, |tx, tz| {
            infection.contains(tx, tz)
        });
        self.overlay = TransientMesh::build(&self.device, "Infected Overlay", &overlay);
        self.decor = TransientMesh::build(&self.device, "Decor", &decor.compose(&view, view_far));
        self.sea = TransientMesh::build(&self.device, "Sea", &sea_quad(camera, view_far));
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: SKY_COLOR[0] as f64,
                            g: SKY_COLOR[1] as f64,
                            b: SKY_COLOR[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0.0), // Reversed-Z: clear to 0 instead of 1
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipelines.terrain);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);

            if let Some(sea) = &self.sea {
                sea.draw(&mut pass);
            }
            for key in &self.visible {
                if let Some(chunk) = self.gpu_chunks.get(*key) {
                    pass.set_vertex_buffer(0, chunk.vertex_buffer.slice(..));
                    pass.set_index_buffer(chunk.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..chunk.index_count, 0, 0..1);
                }
            }
            if let Some(overlay) = &self.overlay {
                overlay.draw(&mut pass);
            }

            if let Some(decor) = &self.decor {
                pass.set_pipeline(&self.pipelines.decor);
                pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                decor.draw(&mut pass);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(())
    }
}

/// Квад моря под всем активным окном, следует за камерой
fn sea_quad(camera: &Camera, view_far: i32) -> MeshData {
    let half = (view_far + CHUNK_SIZE) as f32 * TILE;
    let cx = camera.position.x;
    let cz = camera.position.z;
    let mut mesh = MeshData::new();
    mesh.push_tile_quad(
        cx - half,
        cz - half,
        cx + half,
        cz + half,
        [SEA_LEVEL; 4],
        SEA_COLOR,
    );
    mesh
}
