// ============================================
// Core - Приложение, ресурсы, конфигурация
// ============================================

pub mod app;
pub mod config;
pub mod resources;

pub use resources::GameResources;
