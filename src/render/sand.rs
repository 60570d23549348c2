use super::helpers;
use folio_core::geometry::plane_grid;
use folio_core::GroundPlane;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SandUniforms {
    color: [f32; 4],
    grid_color: [f32; 4],
    pointer: [f32; 2],
    resolution: [f32; 2],
    time: f32,
    ripple_strength: f32,
    ground_y: f32,
    _pad: f32,
}

impl SandUniforms {
    pub(crate) fn from_ground(ground: &GroundPlane) -> Self {
        let m = &ground.material;
        let [r, g, b] = helpers::srgb_to_linear(m.color.to_array());
        let [gr, gg, gb] = helpers::srgb_to_linear(m.grid_color.to_array());
        Self {
            color: [r, g, b, 1.0],
            grid_color: [gr, gg, gb, 1.0],
            pointer: m.pointer.to_array(),
            resolution: m.resolution.to_array(),
            time: m.time,
            ripple_strength: m.ripple_strength,
            ground_y: ground.transform.position.y,
            _pad: 0.0,
        }
    }
}

pub(crate) struct SandResources {
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) fn create_sand_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    camera_bgl: &wgpu::BindGroupLayout,
    hdr_format: wgpu::TextureFormat,
    ground: &GroundPlane,
) -> SandResources {
    let mesh = plane_grid(ground.width, ground.depth, ground.segments);
    let bgl = helpers::uniform_layout(
        device,
        "sand_bgl",
        wgpu::ShaderStages::VERTEX_FRAGMENT,
    );
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sand_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("sand_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_sand"),
            buffers: &[helpers::mesh_vertex_layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        // Visible from below as well as above.
        primitive: wgpu::PrimitiveState {
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(helpers::scene_depth_state(true)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_sand"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer =
        helpers::uniform_buffer(device, "sand_uniforms", &SandUniforms::from_ground(ground));
    let bind_group = helpers::uniform_bind_group(device, "sand_bg", &bgl, &uniform_buffer);

    SandResources {
        pipeline,
        vertices: helpers::vertex_buffer(device, "sand_vertices", &mesh.vertices),
        indices: helpers::index_buffer(device, "sand_indices", &mesh.indices),
        index_count: mesh.indices.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

impl SandResources {
    pub(crate) fn write(&self, queue: &wgpu::Queue, ground: &GroundPlane) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SandUniforms::from_ground(ground)),
        );
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
