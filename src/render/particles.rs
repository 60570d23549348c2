use super::helpers;
use folio_core::ParticleField;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleInstance {
    base: [f32; 3],
    seed: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ParticleUniforms {
    color: [f32; 4],
    resolution: [f32; 2],
    time: f32,
    pixel_ratio: f32,
    size: f32,
    _pad: [f32; 3],
}

impl ParticleUniforms {
    /// `resolution` is the framebuffer size in physical pixels.
    pub(crate) fn new(field: &ParticleField, resolution: [f32; 2]) -> Self {
        let m = &field.material;
        let [r, g, b] = helpers::srgb_to_linear(m.color.to_array());
        Self {
            color: [r, g, b, 1.0],
            resolution,
            time: m.time,
            pixel_ratio: m.pixel_ratio,
            size: m.size,
            _pad: [0.0; 3],
        }
    }
}

const QUAD_VERTICES: u32 = 6;

pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    shader: &wgpu::ShaderModule,
    camera_bgl: &wgpu::BindGroupLayout,
    hdr_format: wgpu::TextureFormat,
    field: &ParticleField,
    resolution: [f32; 2],
) -> ParticleResources {
    let data: Vec<ParticleInstance> = field
        .particles
        .iter()
        .map(|p| ParticleInstance {
            base: p.base.to_array(),
            seed: p.seed,
        })
        .collect();

    let bgl = helpers::uniform_layout(device, "particles_bgl", wgpu::ShaderStages::VERTEX_FRAGMENT);
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let additive = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Zero,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("particles_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_particle"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<ParticleInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32],
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(helpers::scene_depth_state(false)),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_particle"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(additive),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });
    let uniform_buffer = helpers::uniform_buffer(
        device,
        "particles_uniforms",
        &ParticleUniforms::new(field, resolution),
    );
    let bind_group = helpers::uniform_bind_group(device, "particles_bg", &bgl, &uniform_buffer);

    ParticleResources {
        pipeline,
        instances: helpers::vertex_buffer(device, "particle_instances", &data),
        instance_count: data.len() as u32,
        uniform_buffer,
        bind_group,
    }
}

impl ParticleResources {
    pub(crate) fn write(&self, queue: &wgpu::Queue, field: &ParticleField, resolution: [f32; 2]) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&ParticleUniforms::new(field, resolution)),
        );
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instances.slice(..));
        pass.draw(0..QUAD_VERTICES, 0..self.instance_count);
    }
}
