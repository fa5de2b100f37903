use wgpu::*;

use crate::model::{GameState, RectDraw};
use crate::view::gpu_init::GpuContext;
use crate::view::pipeline::{create_rect_program, RectProgram, RectUniforms};
use crate::view::quad::{upload_unit_quad, MeshBuffer, QUAD_INDEX_COUNT};

/// What the renderer needs from the GPU. Every call is infallible from the
/// caller's point of view; a backend that cannot honour one skips it.
pub trait RenderBackend {
    /// Start a frame and clear it to `color`.
    fn clear_frame(&mut self, color: [f32; 3]);
    fn use_program(&mut self);
    fn set_rect_uniforms(&mut self, uniforms: &RectUniforms);
    fn bind_geometry(&mut self);
    fn draw_indexed(&mut self, index_count: u32);
    /// Submit everything recorded since `clear_frame` and show it.
    fn present(&mut self);

    /// The backend can no longer draw at all; the frame loop should stop.
    fn is_lost(&self) -> bool {
        false
    }
}

/// Draw one rectangle: program, uniforms, geometry, six indices.
pub fn draw_rect<B: RenderBackend + ?Sized>(backend: &mut B, rect: &RectDraw) {
    backend.use_program();
    backend.set_rect_uniforms(&RectUniforms::new(
        [rect.x, rect.y],
        [rect.width, rect.height],
        rect.color,
    ));
    backend.bind_geometry();
    backend.draw_indexed(QUAD_INDEX_COUNT);
}

/// Left paddle, right paddle, ball. One draw each, always in that order.
pub fn draw_entities<B: RenderBackend + ?Sized>(backend: &mut B, state: &GameState) {
    for rect in state.draw_requests().iter() {
        draw_rect(backend, rect);
    }
}

/// What to do when the next surface texture can't be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceAction {
    /// Reconfigure the surface and skip this frame
    Reconfigure,
    Skip,
    /// Nothing more can be drawn
    Terminate,
}

pub fn surface_action(error: &SurfaceError) -> SurfaceAction {
    match error {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceAction::Reconfigure,
        SurfaceError::OutOfMemory => SurfaceAction::Terminate,
        _ => SurfaceAction::Skip,
    }
}

/// Whether draw commands may be recorded with a program. Warns the first
/// time a broken program blocks them; clearing and presenting are unaffected.
fn program_gate(usable: bool, warned: &mut bool) -> bool {
    if !usable && !*warned {
        tracing::warn!("rect program failed to build, draw calls are skipped");
        *warned = true;
    }
    usable
}

/// Uniform slots available per frame; each draw takes one.
const UNIFORM_SLOTS: u64 = 16;

// Field order is drop order: the pass ends before its encoder.
struct ActiveFrame {
    pass: RenderPass<'static>,
    encoder: CommandEncoder,
    surface_texture: SurfaceTexture,
}

/// `RenderBackend` on top of a wgpu surface.
///
/// Per-draw uniforms go into their own slot of one buffer and are selected
/// with a dynamic offset, so several draws can share a single render pass.
pub struct SurfaceBackend {
    gpu: GpuContext,
    program: RectProgram,
    quad: MeshBuffer,
    uniform_buffer: Buffer,
    uniform_bind_group: BindGroup,
    uniform_stride: u64,
    next_slot: u64,
    frame: Option<ActiveFrame>,
    warned_unusable: bool,
    warned_slots: bool,
    device_lost: bool,
}

fn align_to(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}

impl SurfaceBackend {
    /// Build the program and upload the unit quad.
    pub fn new(gpu: GpuContext) -> Self {
        let device = gpu.device.as_ref();
        let program = create_rect_program(device, gpu.format);
        let quad = upload_unit_quad(device);

        let alignment = device.limits().min_uniform_buffer_offset_alignment as u64;
        let uniform_stride = align_to(std::mem::size_of::<RectUniforms>() as u64, alignment);

        let uniform_buffer = device.create_buffer(&BufferDescriptor {
            label: Some("rect_uniform_buffer"),
            size: uniform_stride * UNIFORM_SLOTS,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("rect_bind_group"),
            layout: &program.bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer(BufferBinding {
                    buffer: &uniform_buffer,
                    offset: 0,
                    size: BufferSize::new(std::mem::size_of::<RectUniforms>() as u64),
                }),
            }],
        });

        tracing::info!(uniform_stride, "renderer ready");

        Self {
            gpu,
            program,
            quad,
            uniform_buffer,
            uniform_bind_group,
            uniform_stride,
            next_slot: 0,
            frame: None,
            warned_unusable: false,
            warned_slots: false,
            device_lost: false,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn acquire(&mut self) -> Option<SurfaceTexture> {
        let error = match self.gpu.surface.get_current_texture() {
            Ok(texture) => return Some(texture),
            Err(e) => e,
        };
        match surface_action(&error) {
            SurfaceAction::Reconfigure => {
                tracing::warn!("surface {error:?}, reconfiguring and skipping frame");
                self.gpu.reconfigure();
            }
            SurfaceAction::Skip => tracing::debug!("surface {error:?}, skipping frame"),
            SurfaceAction::Terminate => {
                tracing::error!("surface {error:?}, giving up");
                self.device_lost = true;
            }
        }
        None
    }

    /// Frame pass to record into, if a frame is open and the program can be used.
    fn drawable_pass(&mut self) -> Option<&mut RenderPass<'static>> {
        if !program_gate(self.program.is_usable(), &mut self.warned_unusable) {
            return None;
        }
        self.frame.as_mut().map(|frame| &mut frame.pass)
    }
}

impl RenderBackend for SurfaceBackend {
    fn clear_frame(&mut self, color: [f32; 3]) {
        // An unpresented frame is dropped without being shown.
        self.frame = None;
        self.next_slot = 0;

        let Some(surface_texture) = self.acquire() else { return };
        let view = surface_texture.texture.create_view(&TextureViewDescriptor::default());
        let mut encoder = self.gpu.device.create_command_encoder(&CommandEncoderDescriptor {
            label: Some("frame_encoder"),
        });

        let pass = encoder
            .begin_render_pass(&RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: color[0] as f64,
                            g: color[1] as f64,
                            b: color[2] as f64,
                            a: 1.0,
                        }),
                        store: StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime();

        self.frame = Some(ActiveFrame { pass, encoder, surface_texture });
    }

    fn use_program(&mut self) {
        if self.drawable_pass().is_none() {
            return;
        }
        let pipeline = &self.program.pipeline;
        if let Some(frame) = self.frame.as_mut() {
            frame.pass.set_pipeline(pipeline);
        }
    }

    fn set_rect_uniforms(&mut self, uniforms: &RectUniforms) {
        if self.frame.is_none() || !self.program.is_usable() {
            return;
        }
        if self.next_slot >= UNIFORM_SLOTS {
            if !self.warned_slots {
                tracing::warn!(slots = UNIFORM_SLOTS, "more draws than uniform slots, reusing the last one");
                self.warned_slots = true;
            }
            self.next_slot = UNIFORM_SLOTS - 1;
        }

        let offset = self.next_slot * self.uniform_stride;
        self.gpu
            .queue
            .write_buffer(&self.uniform_buffer, offset, bytemuck::bytes_of(uniforms));
        self.next_slot += 1;

        let bind_group = &self.uniform_bind_group;
        if let Some(frame) = self.frame.as_mut() {
            frame.pass.set_bind_group(0, bind_group, &[offset as u32]);
        }
    }

    fn bind_geometry(&mut self) {
        let quad = &self.quad;
        if !self.program.is_usable() {
            return;
        }
        if let Some(frame) = self.frame.as_mut() {
            frame.pass.set_vertex_buffer(0, quad.vertex_buffer.slice(..));
            frame.pass.set_index_buffer(quad.index_buffer.slice(..), IndexFormat::Uint32);
        }
    }

    fn draw_indexed(&mut self, index_count: u32) {
        let index_count = index_count.min(self.quad.index_count);
        if let Some(pass) = self.drawable_pass() {
            pass.draw_indexed(0..index_count, 0, 0..1);
        }
    }

    fn present(&mut self) {
        let Some(ActiveFrame { pass, encoder, surface_texture }) = self.frame.take() else {
            return;
        };
        drop(pass);
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
    }

    fn is_lost(&self) -> bool {
        self.device_lost
    }
}

impl Drop for SurfaceBackend {
    fn drop(&mut self) {
        self.frame = None;
        tracing::info!("releasing GPU resources");
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Clear([f32; 3]),
        UseProgram,
        SetUniforms(RectUniforms),
        BindGeometry,
        DrawIndexed(u32),
        Present,
    }

    /// Backend that only remembers what it was asked to do.
    #[derive(Default)]
    pub struct RecordingBackend {
        pub calls: Vec<Call>,
        /// Reported through `is_lost`
        pub lost: bool,
    }

    impl RecordingBackend {
        pub fn uniforms(&self) -> Vec<RectUniforms> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::SetUniforms(u) => Some(*u),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, call: &Call) -> usize {
            self.calls.iter().filter(|c| *c == call).count()
        }
    }

    impl RenderBackend for RecordingBackend {
        fn clear_frame(&mut self, color: [f32; 3]) {
            self.calls.push(Call::Clear(color));
        }

        fn use_program(&mut self) {
            self.calls.push(Call::UseProgram);
        }

        fn set_rect_uniforms(&mut self, uniforms: &RectUniforms) {
            self.calls.push(Call::SetUniforms(*uniforms));
        }

        fn bind_geometry(&mut self) {
            self.calls.push(Call::BindGeometry);
        }

        fn draw_indexed(&mut self, index_count: u32) {
            self.calls.push(Call::DrawIndexed(index_count));
        }

        fn present(&mut self) {
            self.calls.push(Call::Present);
        }

        fn is_lost(&self) -> bool {
            self.lost
        }
    }
}
