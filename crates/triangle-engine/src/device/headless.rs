use anyhow::{Context, Result};

use super::GpuInit;

/// Device and queue without a surface, for offscreen rendering.
pub struct HeadlessGpu {
    adapter_info: wgpu::AdapterInfo,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Requests any adapter matching `init`; no window or surface is involved.
    pub async fn new(init: &GpuInit) -> Result<Self> {
        let instance = init.instance();
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a GPU adapter")?;

        let adapter_info = adapter.get_info();
        log::info!("headless adapter: {adapter_info:?}");

        let (device, queue) = adapter
            .request_device(&init.device_descriptor("triangle headless device"))
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self {
            adapter_info,
            device,
            queue,
        })
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
