// src/rendering_lib/mod.rs

pub mod frame_surface;
pub mod renderer;
pub mod shader;
pub mod vertex;

pub use frame_surface::FrameSurface;
pub use renderer::Renderer;
pub use shader::WGSL_SHADER_SOURCE;
pub use vertex::Vertex;
