//! Overlay pass for the cursor glow: a triangle fan whose alpha fades from
//! the center to the rim, drawn over the sprite layer.

use glam::Vec2;

use crate::stage::GlowSpot;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    pub position: [f32; 2], // Normalized screen space, (0,0) top-left
    pub color: [f32; 4],
}

const GLOW_SEGMENTS: u16 = 48;
const CENTER_ALPHA: f32 = 0.18;

/// Fan geometry for a glow spot. Empty when the spot is inactive or the
/// screen has no area.
pub fn glow_geometry(
    spot: &GlowSpot,
    radius: f32,
    color: [f32; 4],
    screen_width: f32,
    screen_height: f32,
) -> (Vec<UIVertex>, Vec<u16>) {
    if !spot.active || screen_width <= 0.0 || screen_height <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let screen = Vec2::new(screen_width, screen_height);
    let center = spot.position / screen;
    // Radius in pixels, so the spot stays round on non-square windows
    let extent = Vec2::splat(radius) / screen;

    let center_color = [color[0], color[1], color[2], color[3] * CENTER_ALPHA];
    let rim_color = [color[0], color[1], color[2], 0.0];

    let mut vertices = Vec::with_capacity(GLOW_SEGMENTS as usize + 2);
    let mut indices = Vec::with_capacity(GLOW_SEGMENTS as usize * 3);

    vertices.push(UIVertex {
        position: center.to_array(),
        color: center_color,
    });

    for i in 0..=GLOW_SEGMENTS {
        let angle = (i as f32 / GLOW_SEGMENTS as f32) * std::f32::consts::PI * 2.0;
        let rim = center + Vec2::new(angle.cos(), angle.sin()) * extent;
        vertices.push(UIVertex {
            position: rim.to_array(),
            color: rim_color,
        });

        if i > 0 {
            indices.push(0);
            indices.push(i);
            indices.push(i + 1);
        }
    }

    (vertices, indices)
}

pub struct UIOverlay {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
}

impl UIOverlay {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("UI Overlay Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/ui_overlay.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("UI Overlay Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("UI Overlay Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<UIVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: 8,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x4,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // Sized for one glow fan, rewritten every frame
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("UI Vertex Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("UI Index Buffer"),
            size: 4096,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            num_indices: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render_glow(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        spot: &GlowSpot,
        radius: f32,
        color: [f32; 4],
        screen_width: f32,
        screen_height: f32,
    ) {
        let (vertices, indices) = glow_geometry(spot, radius, color, screen_width, screen_height);
        self.upload_and_render(queue, encoder, view, vertices, indices);
    }

    fn upload_and_render(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertices: Vec<UIVertex>,
        mut indices: Vec<u16>,
    ) {
        if vertices.is_empty() || indices.is_empty() {
            return;
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        // u16 indices must be padded to COPY_BUFFER_ALIGNMENT (4 bytes)
        let original_index_count = indices.len();
        if indices.len() % 2 != 0 {
            indices.push(0);
        }
        queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&indices));

        self.num_indices = original_index_count as u32;

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("UI Overlay Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}
