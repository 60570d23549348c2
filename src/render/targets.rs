use super::helpers;
use crate::constants::BLOOM_DOWNSCALE;

pub(crate) const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Offscreen targets for the hero pass.
///
/// - `hdr_*` holds the lit scene in Rgba16Float for post-processing.
/// - `depth_*` is the matching depth buffer.
/// - `bloom_*` are reduced-resolution ping-pong buffers for bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_tex: wgpu::Texture,
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a: wgpu::Texture,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b: wgpu::Texture,
    pub(crate) bloom_b_view: wgpu::TextureView,
}

pub(crate) fn bloom_size(width: u32, height: u32) -> (u32, u32) {
    (
        (width.max(1) / BLOOM_DOWNSCALE).max(1),
        (height.max(1) / BLOOM_DOWNSCALE).max(1),
    )
}

fn sampled_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    helpers::create_color_texture(
        device,
        label,
        width,
        height,
        HDR_FORMAT,
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
    )
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (hdr_tex, hdr_view) = sampled_target(device, "hdr_tex", width, height);
        let (depth_tex, depth_view) = helpers::create_depth_texture(device, width, height);
        let (bw, bh) = bloom_size(width, height);
        let (bloom_a, bloom_a_view) = sampled_target(device, "bloom_a", bw, bh);
        let (bloom_b, bloom_b_view) = sampled_target(device, "bloom_b", bw, bh);
        Self {
            hdr_tex,
            hdr_view,
            depth_tex,
            depth_view,
            bloom_a,
            bloom_a_view,
            bloom_b,
            bloom_b_view,
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        for tex in [&self.hdr_tex, &self.depth_tex, &self.bloom_a, &self.bloom_b] {
            tex.destroy();
        }
        *self = Self::new(device, width, height);
    }
}
