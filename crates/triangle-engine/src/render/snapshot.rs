use anyhow::{Context, Result};

use crate::color::Color;
use crate::device::HeadlessGpu;
use crate::render::{RenderCtx, RenderTarget, TrianglePipeline};

/// Color format of offscreen renders. Linear values are stored without sRGB encoding.
pub const SNAPSHOT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

const BYTES_PER_PIXEL: u32 = 4;

/// RGBA8 pixels read back from an offscreen render, rows top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl Snapshot {
    /// Pixel at column `x`, row `y` (row 0 is the top of the image).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// NDC coordinates of the center of pixel `(x, y)`; NDC Y points up.
    pub fn pixel_center_ndc(&self, x: u32, y: u32) -> (f32, f32) {
        let nx = (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0;
        let ny = 1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0;
        (nx, ny)
    }

    /// Tightly packed RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Renders the triangle over `background` into a `width` x `height` texture and
/// reads the result back.
pub fn render_snapshot(
    gpu: &HeadlessGpu,
    pipeline: &mut TrianglePipeline,
    width: u32,
    height: u32,
    background: Color,
) -> Result<Snapshot> {
    let device = gpu.device();
    check_snapshot_size(width, height, device.limits().max_texture_dimension_2d)?;
    anyhow::ensure!(background.is_finite(), "background color must be finite, got {background:?}");

    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("triangle snapshot target"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SNAPSHOT_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let padded_row = padded_bytes_per_row(width);
    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("triangle snapshot readback"),
        size: padded_row as u64 * height as u64,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("triangle snapshot encoder"),
    });

    {
        let ctx = RenderCtx::new(device, SNAPSHOT_FORMAT);
        let mut target = RenderTarget::new(&mut encoder, &view);
        target.clear(background);
        pipeline.render(&ctx, &mut target);
    }

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        extent,
    );

    gpu.queue().submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (sender, receiver) = async_channel::bounded(1);
    slice.map_async(wgpu::MapMode::Read, move |res| {
        // Capacity 1 and a single send; only fails if `receiver` is already gone.
        let _ = sender.try_send(res);
    });

    device
        .poll(wgpu::PollType::wait_indefinitely())
        .context("device lost while waiting for snapshot readback")?;
    receiver
        .recv_blocking()
        .context("readback map callback was dropped")?
        .context("failed to map snapshot readback buffer")?;

    let pixels = {
        let mapped = slice.get_mapped_range();
        unpad_rows(&mapped, width, height, padded_row)
    };
    readback.unmap();

    log::debug!("snapshot read back: {width}x{height}");

    Ok(Snapshot {
        width,
        height,
        pixels,
    })
}

/// Rejects sizes a 2D texture cannot have on this device.
pub(crate) fn check_snapshot_size(width: u32, height: u32, max_dimension: u32) -> Result<()> {
    anyhow::ensure!(width > 0 && height > 0, "snapshot size must be non-zero, got {width}x{height}");
    anyhow::ensure!(
        width <= max_dimension && height <= max_dimension,
        "snapshot size {width}x{height} exceeds the device limit of {max_dimension} per side"
    );
    Ok(())
}

/// Row pitch for texture-to-buffer copies, rounded up to wgpu's alignment.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

fn unpad_rows(bytes: &[u8], width: u32, height: u32, padded_row: u32) -> Vec<[u8; 4]> {
    let row_len = (width * BYTES_PER_PIXEL) as usize;
    let mut pixels = Vec::with_capacity((width * height) as usize);

    for row in bytes.chunks(padded_row as usize).take(height as usize) {
        pixels.extend_from_slice(bytemuck::cast_slice::<u8, [u8; 4]>(&row[..row_len]));
    }

    pixels
}
