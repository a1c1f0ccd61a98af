/// Initialization parameters for the GPU layer.
///
/// Shared by the windowed [`Gpu`](super::Gpu) and the offscreen
/// [`HeadlessGpu`](super::HeadlessGpu); surface-only fields are ignored headless.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends wgpu may pick from.
    pub backends: wgpu::Backends,

    /// Adapter selection hint.
    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format when available.
    ///
    /// The fill and background colors are linear; an sRGB target encodes them on write.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface. A hint only.
    pub desired_maximum_frame_latency: u32,
}

impl GpuInit {
    pub(crate) fn instance(&self) -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        })
    }

    pub(crate) fn device_descriptor<'a>(&self, label: &'a str) -> wgpu::DeviceDescriptor<'a> {
        wgpu::DeviceDescriptor {
            label: Some(label),
            // The triangle needs nothing beyond core WebGPU.
            required_features: wgpu::Features::empty(),
            required_limits: self.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }
    }
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::default(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_request_core_limits_and_no_features() {
        let init = GpuInit::default();
        assert_eq!(init.required_limits, wgpu::Limits::default());
        assert!(init.prefer_srgb);

        let desc = init.device_descriptor("test device");
        assert_eq!(desc.label, Some("test device"));
        assert_eq!(desc.required_features, wgpu::Features::empty());
        assert_eq!(desc.required_limits, wgpu::Limits::default());
    }
}
