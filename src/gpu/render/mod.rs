// ============================================
// Render - GPU пайплайн
// ============================================

pub mod depth;
pub mod frustum;
pub mod gpu_chunks;
pub mod pipelines;
pub mod renderer;
pub mod uniforms;

pub use frustum::{chunk_ahead, in_frustum, ViewPoint};
pub use renderer::Renderer;
