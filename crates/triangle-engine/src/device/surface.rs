use winit::dpi::PhysicalSize;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Out of memory; terminate gracefully.
    Fatal,
}

/// Picks the surface format: the first sRGB candidate when `prefer_srgb`, else the
/// first format the surface reports.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let first = *formats.first()?;

    if prefer_srgb {
        if let Some(f) = formats.iter().copied().find(wgpu::TextureFormat::is_srgb) {
            return Some(f);
        }
    }

    Some(first)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// wgpu cannot configure a 0x0 surface; such sizes only update bookkeeping.
#[inline]
pub(crate) fn is_configurable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, TextureFormat as Fmt};

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn empty_format_list_has_no_choice() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn prefers_srgb_when_asked() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn takes_first_when_srgb_not_preferred() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_without_srgb() {
        let formats = [Fmt::Rgba16Float, Fmt::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Rgba16Float));
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn keeps_supported_alpha_request() {
        let supported = [Alpha::Opaque, Alpha::PreMultiplied];
        assert_eq!(choose_alpha_mode(&supported, Some(Alpha::PreMultiplied)), Alpha::PreMultiplied);
    }

    #[test]
    fn unsupported_alpha_request_uses_first_supported() {
        let supported = [Alpha::Opaque];
        assert_eq!(choose_alpha_mode(&supported, Some(Alpha::PostMultiplied)), Alpha::Opaque);
    }

    #[test]
    fn no_supported_alpha_is_auto() {
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }

    // ── size / errors ─────────────────────────────────────────────────────

    #[test]
    fn zero_sized_surface_is_not_configurable() {
        assert!(!is_configurable(PhysicalSize::new(0, 600)));
        assert!(!is_configurable(PhysicalSize::new(800, 0)));
        assert!(is_configurable(PhysicalSize::new(1, 1)));
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(classify_surface_error(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&E::Other), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
