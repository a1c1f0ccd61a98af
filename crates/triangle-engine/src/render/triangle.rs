use crate::render::{RenderCtx, RenderTarget};
use crate::shader::{FS_MAIN, TRIANGLE_WGSL, VERTEX_COUNT, VS_MAIN};

/// Render pipeline for the triangle shader pair.
///
/// No vertex, index or uniform buffers exist: the vertex stage pulls positions from
/// the vertex index. The pipeline is built on first use and rebuilt whenever the
/// target format changes.
#[derive(Default)]
pub struct TrianglePipeline {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
}

impl TrianglePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the current pipeline was built for, if any.
    pub fn format(&self) -> Option<wgpu::TextureFormat> {
        self.pipeline_format
    }

    /// Draws the triangle over the existing contents of `target`.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        self.ensure_pipeline(ctx);
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.draw(0..VERTEX_COUNT, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.target_format) && self.pipeline.is_some() {
            return;
        }

        log::debug!("building triangle pipeline for {:?}", ctx.target_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangle shader"),
            source: wgpu::ShaderSource::Wgsl(TRIANGLE_WGSL.into()),
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("triangle pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VS_MAIN),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FS_MAIN),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.target_format);
        self.pipeline = Some(pipeline);
    }
}
