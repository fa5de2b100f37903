use bytemuck::{Pod, Zeroable};

use crate::error::ShaderError;
use crate::view::quad::QuadVertex;
use crate::view::viewport::RECT_SHADER_SRC;

/// Per-draw parameters of the rect shader. Matches `RectUniforms` in
/// `shaders/rect.wgsl` (vec3 color padded to 16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RectUniforms {
    pub pos: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 3],
    _pad: f32,
}

impl RectUniforms {
    pub fn new(pos: [f32; 2], size: [f32; 2], color: [f32; 3]) -> Self {
        Self { pos, size, color, _pad: 0.0 }
    }
}

/// The compiled rect program. `errors` holds whatever went wrong while
/// building it; a program with errors is kept around but must not be drawn with.
pub struct RectProgram {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub errors: Vec<ShaderError>,
}

impl RectProgram {
    pub fn is_usable(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Build the rect program. Validation errors are captured and logged rather
/// than returned, so the caller always gets a program back.
pub fn create_rect_program(device: &wgpu::Device, format: wgpu::TextureFormat) -> RectProgram {
    let mut errors = Vec::new();

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("rect_shader"),
        source: wgpu::ShaderSource::Wgsl(RECT_SHADER_SRC.into()),
    });
    if let Some(e) = pollster::block_on(device.pop_error_scope()) {
        errors.push(ShaderError::Compile(e.to_string()));
    }

    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("rect_bind_group_layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<RectUniforms>() as u64),
            },
            count: None,
        }],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("rect_pipeline_layout"),
        bind_group_layouts: &[&bind_group_layout],
        push_constant_ranges: &[],
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("rect_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[QuadVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState { count: 1, mask: !0, alpha_to_coverage_enabled: false },
        multiview: None,
        cache: None,
    });
    if let Some(e) = pollster::block_on(device.pop_error_scope()) {
        errors.push(ShaderError::Link(e.to_string()));
    }

    for e in &errors {
        tracing::error!("{e}");
    }
    if errors.is_empty() {
        tracing::info!(?format, "rect program ready");
    }

    RectProgram { pipeline, bind_group_layout, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // vec2 + vec2 + vec3 rounds up to a 32 byte struct in WGSL
        assert_eq!(std::mem::size_of::<RectUniforms>(), 32);
        assert_eq!(std::mem::offset_of!(RectUniforms, size), 8);
        assert_eq!(std::mem::offset_of!(RectUniforms, color), 16);
    }

    #[test]
    fn test_uniform_constructor_zeroes_padding() {
        let u = RectUniforms::new([1.0, 2.0], [3.0, 4.0], [0.5, 0.5, 0.5]);
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[28..], &[0u8; 4]);
    }
}
