use crate::mesh::{MeshKey, Vertex};
use crate::shaders;
use bigday_assets::Material;
use bigday_common::Light;
use bigday_render::{DrawCall, ProgramState, RenderError, Renderer};
use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec4};
use std::collections::{HashMap, HashSet};
use wgpu::util::DeviceExt;

/// Remaps GL clip depth (-1..1) onto wgpu's 0..1 so GL-style projections
/// and the identity projection keep objects with negative z visible.
#[rustfmt::skip]
const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_position: [f32; 4],
    light_position: [f32; 4],
    light_color: [f32; 4],
}

impl Uniforms {
    fn from_state(state: &ProgramState) -> Self {
        let (light_position, light_color) = light_params(state.lights.first());
        Self {
            view_proj: (GL_TO_WGPU_DEPTH * state.view_projection()).to_cols_array_2d(),
            camera_position: state.camera_transform().w_axis.to_array(),
            light_position,
            light_color,
        }
    }
}

/// Without a light the scene is lit by ambient terms only.
fn light_params(light: Option<&Light>) -> ([f32; 4], [f32; 4]) {
    match light {
        Some(light) => {
            let c = light.color.0;
            (light.position.to_array(), [c.x, c.y, c.z, light.size])
        }
        None => ([0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]),
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    normal_0: [f32; 4],
    normal_1: [f32; 4],
    normal_2: [f32; 4],
    color: [f32; 4],
    coefficients: [f32; 4],
}

impl InstanceData {
    fn new(transform: Mat4, material: &Material) -> Self {
        let cols = transform.to_cols_array_2d();
        let n = normal_matrix(transform);
        let pad = |v: glam::Vec3| v.extend(0.0).to_array();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            normal_0: pad(n.x_axis),
            normal_1: pad(n.y_axis),
            normal_2: pad(n.z_axis),
            color: material.color.to_array(),
            coefficients: Vec4::new(
                material.ambient,
                material.diffusivity,
                material.specularity,
                material.smoothness,
            )
            .to_array(),
        }
    }
}

/// Inverse-transpose of the upper 3x3. Flattened transforms (a zero scale
/// axis) have no inverse and keep the plain linear part.
fn normal_matrix(model: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(model);
    if linear.determinant().abs() < 1e-8 {
        linear
    } else {
        linear.inverse().transpose()
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct PendingDraw {
    mesh: MeshKey,
    instance: InstanceData,
}

/// wgpu-based scene renderer.
///
/// [`Renderer::draw`] only queues; call [`WgpuRenderer::flush`] once per
/// frame to submit the queued draws.
pub struct WgpuRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniforms: Uniforms,
    instance_buffer: wgpu::Buffer,
    max_instances: u32,
    meshes: HashMap<MeshKey, GpuMesh>,
    pending: Vec<PendingDraw>,
    warned: HashSet<String>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniforms = Uniforms::from_state(&ProgramState::new());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![
                            0 => Float32x3,
                            1 => Float32x3,
                        ],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4,
                            8 => Float32x4,
                            9 => Float32x4,
                            10 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            // Flat shapes are seen from both sides.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            // Later draws win ties so coplanar layers stack in issue order.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let max_instances = 1_024u32;
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (max_instances as u64) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniforms,
            instance_buffer,
            max_instances,
            meshes: HashMap::new(),
            pending: Vec::new(),
            warned: HashSet::new(),
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Number of draws queued since the last flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Render every queued draw into `view` and clear the queue.
    pub fn flush(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, view: &wgpu::TextureView) {
        for draw in &self.pending {
            self.meshes
                .entry(draw.mesh)
                .or_insert_with(|| Self::upload_mesh(device, draw.mesh));
        }

        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
        let instances: Vec<InstanceData> = self.pending.iter().map(|d| d.instance).collect();
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (i, draw) in self.pending.iter().enumerate() {
                let Some(mesh) = self.meshes.get(&draw.mesh) else {
                    continue;
                };
                let i = i as u32;
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, i..i + 1);
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        self.pending.clear();
    }

    fn upload_mesh(device: &wgpu::Device, key: MeshKey) -> GpuMesh {
        let data = key.build();
        tracing::debug!(?key, triangles = data.triangle_count(), "uploading mesh");
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vertex_buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_index_buffer"),
            contents: bytemuck::cast_slice(&data.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

impl Renderer for WgpuRenderer {
    fn draw(&mut self, state: &ProgramState, call: DrawCall<'_>) -> Result<(), RenderError> {
        let Some(mesh) = MeshKey::for_shape(call.shape) else {
            if self.warned.insert(call.name.to_string()) {
                tracing::warn!(name = call.name, shape = %call.shape, "no GPU mesh for shape, skipping");
            }
            return Ok(());
        };
        if self.pending.len() >= self.max_instances as usize {
            return Err(RenderError::InstanceBudget {
                limit: self.max_instances as usize,
            });
        }
        self.uniforms = Uniforms::from_state(state);
        self.pending.push(PendingDraw {
            mesh,
            instance: InstanceData::new(call.transform, call.material),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigday_common::Color;
    use glam::Vec3;

    #[test]
    fn depth_remap_maps_gl_range_onto_unit_range() {
        let near = GL_TO_WGPU_DEPTH * Vec4::new(0.0, 0.0, -1.0, 1.0);
        let far = GL_TO_WGPU_DEPTH * Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(near.z, 0.0);
        assert_eq!(far.z, 1.0);
    }

    #[test]
    fn normal_matrix_undoes_nonuniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let n = normal_matrix(model);
        assert!(n.x_axis.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn normal_matrix_of_flattened_transform_keeps_linear_part() {
        let model = Mat4::from_scale(Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(normal_matrix(model), Mat3::from_mat4(model));
    }

    #[test]
    fn instance_carries_material_coefficients() {
        let material = Material::phong("m")
            .with_ambient(0.5)
            .with_color(Color::rgba(1.0, 0.0, 0.0, 1.0));
        let instance = InstanceData::new(Mat4::IDENTITY, &material);
        assert_eq!(instance.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(instance.coefficients, [0.5, 1.0, 1.0, 40.0]);
        assert_eq!(instance.model_3, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn uniforms_use_first_light_and_camera_position() {
        let mut state = ProgramState::new();
        state.set_camera(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
        state.lights = vec![Light::new(Vec4::new(10.0, 10.0, 10.0, 1.0), Color::WHITE, 1000.0)];
        let u = Uniforms::from_state(&state);
        assert_eq!(u.light_position, [10.0, 10.0, 10.0, 1.0]);
        assert_eq!(u.light_color, [1.0, 1.0, 1.0, 1000.0]);
        let eye = Vec4::from_array(u.camera_position);
        assert!(eye.abs_diff_eq(Vec4::new(0.0, 0.0, 5.0, 1.0), 1e-5));
    }

    #[test]
    fn uniforms_without_light_are_dark() {
        let u = Uniforms::from_state(&ProgramState::new());
        assert_eq!(u.light_color, [0.0, 0.0, 0.0, 1.0]);
    }
}
