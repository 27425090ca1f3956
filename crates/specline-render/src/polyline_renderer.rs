//! Instanced polyline renderer.
//!
//! Draws every segment of a [`LineVertex`] buffer as one instanced quad. The
//! same buffer is bound twice, offset by one vertex, so instance `i` sees
//! vertex `i` as its start and vertex `i + 1` as its end. Segments touching a
//! discontinuity marker collapse to zero area in the vertex shader, so one
//! draw call renders any number of unrelated lines.

use crate::transform::{Projection, ProjectionUniform};
use crate::{GraphicsContext, LineVertex};
use specline_core::profiling::profile_scope;
use specline_test_utils::GpuBuffer;
use std::sync::Arc;
use wgpu::util::DeviceExt;

/// Batched polyline renderer using GPU instancing.
pub struct PolylineRenderer {
    context: Arc<GraphicsContext>,
    pipeline: wgpu::RenderPipeline,
    quad_buffer: wgpu::Buffer,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    sample_count: u32,
}

impl PolylineRenderer {
    /// Vertex buffer slots the pipeline binds (quad, segment start, segment end).
    pub const REQUIRED_VERTEX_BUFFERS: u32 = 3;

    /// Create a new polyline renderer.
    ///
    /// `target_format` must match the render target; `sample_count` is 4 for
    /// anti-aliased tiers and 1 otherwise.
    pub fn new(
        context: Arc<GraphicsContext>,
        target_format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> Self {
        let device = context.device();

        let projection_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Polyline Projection Buffer"),
            size: std::mem::size_of::<ProjectionUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Polyline Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Polyline Projection Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Polyline Shader"),
            source: wgpu::ShaderSource::Wgsl(POLYLINE_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Polyline Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let stride = LineVertex::STRIDE;
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Polyline Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    // Unit quad corners
                    wgpu::VertexBufferLayout {
                        array_stride: 8,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &[wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        }],
                    },
                    // Segment start (vertex i)
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x2,
                                offset: 0,
                                shader_location: 1,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x4,
                                offset: 8,
                                shader_location: 2,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32,
                                offset: 24,
                                shader_location: 3,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32,
                                offset: 28,
                                shader_location: 4,
                            },
                        ],
                    },
                    // Segment end (vertex i + 1)
                    wgpu::VertexBufferLayout {
                        array_stride: stride,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &[
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32x2,
                                offset: 0,
                                shader_location: 5,
                            },
                            wgpu::VertexAttribute {
                                format: wgpu::VertexFormat::Float32,
                                offset: 28,
                                shader_location: 6,
                            },
                        ],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: sample_count.max(1),
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        // Unit quad: x runs along the segment, y across it.
        let quad_vertices: [[f32; 2]; 4] = [[0.0, -0.5], [1.0, -0.5], [0.0, 0.5], [1.0, 0.5]];

        let quad_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Polyline Quad Buffer"),
            contents: bytemuck::cast_slice(&quad_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            context,
            pipeline,
            quad_buffer,
            projection_buffer,
            projection_bind_group,
            sample_count: sample_count.max(1),
        }
    }

    /// MSAA sample count the pipeline was built for.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Upload the projection used by subsequent draws.
    pub fn set_projection(&self, projection: &Projection) {
        self.context.queue().write_buffer(
            &self.projection_buffer,
            0,
            bytemuck::bytes_of(&projection.uniform()),
        );
    }

    /// Draw every segment of a vertex buffer holding `vertex_count` vertices.
    pub fn draw(&self, pass: &mut wgpu::RenderPass, buffer: &GpuBuffer, vertex_count: u32) {
        profile_scope!("polyline_draw");

        if vertex_count < 2 {
            return;
        }

        let Some(vertices) = buffer.as_wgpu() else {
            tracing::trace!("Skipping draw of a non-wgpu buffer");
            return;
        };

        pass.push_debug_group("PolylineRenderer::draw");
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.projection_bind_group, &[]);
        pass.set_vertex_buffer(0, self.quad_buffer.slice(..));
        pass.set_vertex_buffer(1, vertices.slice(..));
        pass.set_vertex_buffer(2, vertices.slice(LineVertex::STRIDE..));
        pass.draw(0..4, 0..vertex_count - 1);
        pass.pop_debug_group();
    }
}

/// WGSL shader expanding each segment into a screen-space quad.
const POLYLINE_SHADER: &str = r#"
struct Projection {
    view_proj: mat4x4<f32>,
    viewport: vec2<f32>,
    _padding: vec2<f32>,
}

@group(0) @binding(0)
var<uniform> projection: Projection;

struct VertexInput {
    @location(0) corner: vec2<f32>,
    @location(1) start: vec2<f32>,
    @location(2) color: vec4<f32>,
    @location(3) width: f32,
    @location(4) start_pen: f32,
    @location(5) end: vec2<f32>,
    @location(6) end_pen: f32,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;

    let half_viewport = projection.viewport * 0.5;
    let clip_start = (projection.view_proj * vec4<f32>(input.start, 0.0, 1.0)).xy;
    let clip_end = (projection.view_proj * vec4<f32>(input.end, 0.0, 1.0)).xy;

    // Work in pixels so width is resolution independent
    let pixel_start = clip_start * half_viewport;
    let pixel_end = clip_end * half_viewport;
    let delta = pixel_end - pixel_start;
    let len = length(delta);

    var dir = vec2<f32>(1.0, 0.0);
    if len > 0.0001 {
        dir = delta / len;
    }
    let perp = vec2<f32>(-dir.y, dir.x);

    let pixel = mix(pixel_start, pixel_end, input.corner.x) + perp * input.corner.y * input.width;

    // Segments touching a break marker collapse to a point
    let visible = input.start_pen * input.end_pen;

    output.position = vec4<f32>(pixel / half_viewport * visible, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;
