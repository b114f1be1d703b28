use wgpu::util::DeviceExt;

use crate::scene::{GeometryStore, Vertex2D};

use super::TransformUniform;

/// WGSL source of the triangle program.
pub const TRIANGLE_SHADER: &str = include_str!("shaders/triangle.wgsl");

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// The backend rejected the shader or the pipeline built from it.
    #[error("shader program failed to compile or link:\n{log}")]
    Compile { log: String },
}

/// Compiled pipeline plus the GPU resources it draws with.
///
/// Created once at startup; lives as long as the window's GPU context.
pub struct TriangleProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    transform_ubo: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
}

impl TriangleProgram {
    /// Compiles [`TRIANGLE_SHADER`] and uploads `geometry`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        geometry: &GeometryStore,
    ) -> Result<Self, ProgramError> {
        // Validation errors are captured here instead of hitting the device's
        // uncaptured-error handler, which panics.
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("arrowhead triangle shader"),
            source: wgpu::ShaderSource::Wgsl(TRIANGLE_SHADER.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("arrowhead transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("arrowhead triangle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("arrowhead triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex2D::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The arrow mixes windings.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            let log = err.to_string();
            log::error!("triangle program rejected by backend: {log}");
            // Shader, layouts and pipeline drop here.
            return Err(ProgramError::Compile { log });
        }

        let transform_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arrowhead transform ubo"),
            contents: bytemuck::bytes_of(&TransformUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("arrowhead transform bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("arrowhead geometry vbo"),
            contents: geometry.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "triangle program ready: {} vertices ({} triangles)",
            geometry.vertex_count(),
            geometry.triangle_count()
        );

        Ok(Self {
            pipeline,
            bind_group,
            transform_ubo,
            vertex_buffer,
        })
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &TransformUniform) {
        queue.write_buffer(&self.transform_ubo, 0, bytemuck::bytes_of(uniforms));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, vertex_count: u32) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use std::mem::offset_of;

    use wgpu::naga;
    use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};

    use super::*;

    fn module() -> naga::Module {
        naga::front::wgsl::parse_str(TRIANGLE_SHADER).unwrap()
    }

    #[test]
    fn shader_parses_and_validates() {
        let module = module();
        Validator::new(ValidationFlags::all(), Capabilities::empty())
            .validate(&module)
            .unwrap();
    }

    #[test]
    fn shader_exposes_both_stages() {
        let module = module();
        let stages: Vec<(&str, naga::ShaderStage)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();

        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn transform_block_matches_uniform_layout() {
        let module = module();
        let (members, span) = module
            .types
            .iter()
            .find_map(|(_, ty)| match (&ty.name, &ty.inner) {
                (Some(name), naga::TypeInner::Struct { members, span }) if name == "Transform" => {
                    Some((members.clone(), *span))
                }
                _ => None,
            })
            .unwrap();

        assert_eq!(span as usize, std::mem::size_of::<TransformUniform>());

        let offsets: Vec<(&str, usize)> = members
            .iter()
            .map(|m| (m.name.as_deref().unwrap_or(""), m.offset as usize))
            .collect();
        assert_eq!(
            &offsets[..3],
            &[
                ("rotation", offset_of!(TransformUniform, rotation)),
                ("translation", offset_of!(TransformUniform, translation)),
                ("scale", offset_of!(TransformUniform, scale)),
            ]
        );
    }
}
