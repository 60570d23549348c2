//! WebGPU renderer for the hero scene.
//!
//! Scene geometry is drawn into an HDR target with depth, then a bright
//! pass, a separable blur and a Reinhard composite produce the swapchain
//! image.

use folio_core::constants::{BLOOM_RADIUS, BLOOM_STRENGTH, BLOOM_THRESHOLD, CLEAR_RGB};
use folio_core::{Camera, Scene};
use web_sys as web;

mod helpers;
mod particles;
mod post;
mod sand;
mod stones;
mod targets;

use particles::ParticleResources;
use post::{PostBindGroups, PostResources, PostUniforms};
use sand::SandResources;
use stones::StoneResources;
use targets::{bloom_size, RenderTargets, HDR_FORMAT};

pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
pub static SAND_WGSL: &str = include_str!("../shaders/sand.wgsl");
pub static STONES_WGSL: &str = include_str!("../shaders/stones.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    eye: [f32; 4],
}

impl CameraUniforms {
    fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
        }
    }
}

fn shader(device: &wgpu::Device, label: &str, source: &'static str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    camera_buffer: wgpu::Buffer,
    camera_bg: wgpu::BindGroup,
    sand: SandResources,
    stones: StoneResources,
    particles: ParticleResources,

    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let camera_bgl = helpers::uniform_layout(
            &device,
            "camera_bgl",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let camera_buffer = helpers::uniform_buffer(
            &device,
            "camera_uniforms",
            &CameraUniforms::from_camera(&scene.camera),
        );
        let camera_bg = helpers::uniform_bind_group(&device, "camera_bg", &camera_bgl, &camera_buffer);

        let sand = sand::create_sand_resources(
            &device,
            &shader(&device, "sand_shader", SAND_WGSL),
            &camera_bgl,
            HDR_FORMAT,
            &scene.ground,
        );
        let stones = stones::create_stone_resources(
            &device,
            &shader(&device, "stones_shader", STONES_WGSL),
            &camera_bgl,
            HDR_FORMAT,
            &scene.solids,
        );
        let particles = particles::create_particle_resources(
            &device,
            &shader(&device, "particles_shader", PARTICLES_WGSL),
            &camera_bgl,
            HDR_FORMAT,
            &scene.particles,
            [width as f32, height as f32],
        );

        let targets = RenderTargets::new(&device, width, height);
        let post = post::create_post_resources(
            &device,
            &shader(&device, "post_shader", POST_WGSL),
            HDR_FORMAT,
            format,
        );
        let post_groups = post.bind_groups(&device, &targets);

        let [r, g, b] = helpers::srgb_to_linear(CLEAR_RGB);
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            camera_buffer,
            camera_bg,
            sand,
            stones,
            particles,
            targets,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
            self.targets.recreate(&self.device, width, height);
            self.post_groups = self.post.bind_groups(&self.device, &self.targets);
            log::debug!("[gpu] resized to {}x{}", width, height);
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn write_uniforms(&mut self, scene: &Scene) {
        let resolution = [self.width as f32, self.height as f32];
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniforms::from_camera(&scene.camera)),
        );
        self.sand.write(&self.queue, &scene.ground);
        self.stones.write(&self.queue, &scene.solids);
        self.particles.write(&self.queue, &scene.particles, resolution);

        let (bw, bh) = bloom_size(self.width, self.height);
        self.post.write_uniforms(
            &self.queue,
            PostUniforms {
                resolution: [bw as f32, bh as f32],
                blur_dir: [0.0, 0.0],
                bloom_strength: BLOOM_STRENGTH,
                bloom_radius: BLOOM_RADIUS,
                threshold: BLOOM_THRESHOLD,
                _pad: 0.0,
            },
        );
    }

    /// Draw one frame. A lost or outdated surface is reconfigured and the
    /// frame skipped.
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        self.write_uniforms(scene);

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.camera_bg, &[]);
            self.sand.draw(&mut rpass);
            self.stones.draw(&mut rpass);
            self.particles.draw(&mut rpass);
        }

        let groups = &self.post_groups;
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &groups.bright_from_hdr,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_h_from_a,
            None,
        );
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &groups.blur_v_from_b,
            None,
        );
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &groups.composite_hdr,
            Some(&groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
