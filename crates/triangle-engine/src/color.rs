/// Linear RGBA color with straight (non-premultiplied) alpha.
///
/// Values are expected in linear space. sRGB encoding is left to the render
/// target: an `*Srgb` surface format encodes on write, a `*Unorm` one stores
/// the values as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Background behind the triangle unless configured otherwise.
    pub const DEFAULT_BACKGROUND: Self = Self::new(0.1, 0.2, 0.3, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    /// Quantizes to 8-bit unorm channels, as a `Rgba8Unorm` target would store them.
    ///
    /// Channels are clamped to `[0, 1]` first.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_background_is_slate_blue() {
        assert_eq!(Color::DEFAULT_BACKGROUND, Color::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let c = Color::new(0.25, 0.5, 0.75, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn to_rgba8_rounds_and_clamps() {
        assert_eq!(Color::new(0.0, 1.0, 2.0, -1.0).to_rgba8(), [0, 255, 255, 0]);
        assert_eq!(Color::new(0.5, 0.2, 0.0, 1.0).to_rgba8(), [128, 51, 0, 255]);
    }

    #[test]
    fn is_finite_rejects_nan() {
        assert!(Color::DEFAULT_BACKGROUND.is_finite());
        assert!(!Color::new(f32::NAN, 0.0, 0.0, 1.0).is_finite());
    }
}
