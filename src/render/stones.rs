use super::helpers;
use folio_core::constants::*;
use folio_core::geometry::{icosahedron, icosahedron_edges};
use folio_core::DecorativeSolid;
use glam::Mat4;

const EMISSIVE_INTENSITY: f32 = 0.1;
const OPACITY: f32 = 0.2;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct StoneUniforms {
    models: [[[f32; 4]; 4]; MAX_SOLIDS],
    color: [f32; 4],
    emissive: [f32; 4],
    wire_color: [f32; 4],
    light_a_pos: [f32; 4],
    light_a_color: [f32; 4],
    light_b_pos: [f32; 4],
    light_b_color: [f32; 4],
}

fn rgb_w(rgb: [f32; 3], w: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], w]
}

impl StoneUniforms {
    pub(crate) fn new(solids: &[DecorativeSolid]) -> Self {
        let neon = helpers::srgb_to_linear(NEON_RGB);
        let accent = helpers::srgb_to_linear(ACCENT_RGB);
        let mut u = Self {
            models: [Mat4::IDENTITY.to_cols_array_2d(); MAX_SOLIDS],
            color: rgb_w(neon, OPACITY),
            emissive: rgb_w(neon, EMISSIVE_INTENSITY),
            wire_color: rgb_w(neon, 1.0),
            light_a_pos: rgb_w(KEY_LIGHT_POS.to_array(), LIGHT_DISTANCE),
            light_a_color: rgb_w(neon, KEY_LIGHT_INTENSITY),
            light_b_pos: rgb_w(FILL_LIGHT_POS.to_array(), LIGHT_DISTANCE),
            light_b_color: rgb_w(accent, FILL_LIGHT_INTENSITY),
        };
        u.set_models(solids);
        u
    }

    fn set_models(&mut self, solids: &[DecorativeSolid]) {
        for (slot, solid) in self.models.iter_mut().zip(solids) {
            *slot = solid.transform.matrix().to_cols_array_2d();
        }
    }
}

pub(crate) struct StoneResources {
    fill_pipeline: wgpu::RenderPipeline,
    wire_pipeline: wgpu::RenderPipeline,
    fill_vertices: wgpu::Buffer,
    fill_vertex_count: u32,
    edges: wgpu::Buffer,
    edge_vertex_count: u32,
    uniforms: StoneUniforms,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instances: u32,
}

pub(crate) fn create_stone_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    camera_bgl: &wgpu::BindGroupLayout,
    hdr_format: wgpu::TextureFormat,
    solids: &[DecorativeSolid],
) -> StoneResources {
    // Unit-radius meshes; per-stone scale lives in the model matrix.
    let mesh = icosahedron(1.0);
    let edges = icosahedron_edges(1.0);

    let bgl = helpers::uniform_layout(device, "stones_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("stones_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let target = [Some(wgpu::ColorTargetState {
        format: hdr_format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })];
    let fill_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("stones_fill_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_fill"),
            buffers: &[helpers::mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(helpers::scene_depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_fill"),
            targets: &target,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let wire_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("stones_wire_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_wire"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::LineList,
            ..Default::default()
        },
        depth_stencil: Some(helpers::scene_depth_state(false)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_wire"),
            targets: &target,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let uniforms = StoneUniforms::new(solids);
    let uniform_buffer = helpers::uniform_buffer(device, "stones_uniforms", &uniforms);
    let bind_group = helpers::uniform_bind_group(device, "stones_bg", &bgl, &uniform_buffer);

    StoneResources {
        fill_pipeline,
        wire_pipeline,
        fill_vertices: helpers::vertex_buffer(device, "stones_vertices", &mesh.vertices),
        fill_vertex_count: mesh.vertices.len() as u32,
        edges: helpers::vertex_buffer(device, "stones_edges", &edges),
        edge_vertex_count: edges.len() as u32,
        uniforms,
        uniform_buffer,
        bind_group,
        instances: solids.len().min(MAX_SOLIDS) as u32,
    }
}

impl StoneResources {
    pub(crate) fn write(&mut self, queue: &wgpu::Queue, solids: &[DecorativeSolid]) {
        self.uniforms.set_models(solids);
        self.instances = solids.len().min(MAX_SOLIDS) as u32;
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instances == 0 {
            return;
        }
        pass.set_bind_group(1, &self.bind_group, &[]);

        pass.set_pipeline(&self.fill_pipeline);
        pass.set_vertex_buffer(0, self.fill_vertices.slice(..));
        pass.draw(0..self.fill_vertex_count, 0..self.instances);

        pass.set_pipeline(&self.wire_pipeline);
        pass.set_vertex_buffer(0, self.edges.slice(..));
        pass.draw(0..self.edge_vertex_count, 0..self.instances);
    }
}
