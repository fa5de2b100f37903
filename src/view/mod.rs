// VIEW: Rendering and graphics
pub mod gpu_init;
pub mod pipeline;
pub mod quad;
pub mod render;
pub mod viewport;

pub use gpu_init::GpuContext;
pub use pipeline::{RectProgram, RectUniforms};
pub use render::{draw_entities, draw_rect, RenderBackend, SurfaceBackend};
