use bytemuck::{Pod, Zeroable};

/// Straight-alpha RGBA colour with four 8-bit channels.
///
/// The layout matches an `Rgba8Unorm` texel so framebuffers of `Rgba8` can be
/// handed to the GPU with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from three channels.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Builds a colour from wide integer channels, saturating each into `0..=255`.
    ///
    /// Game code historically passes channels as plain integers.
    #[inline]
    pub fn from_channels(r: i32, g: i32, b: i32, a: i32) -> Self {
        let c = |v: i32| v.clamp(0, 255) as u8;
        Self::new(c(r), c(g), c(b), c(a))
    }

    /// Returns this colour with alpha scaled by `coverage / 255`.
    #[inline]
    pub fn with_coverage(self, coverage: u8) -> Self {
        let a = (self.a as u16 * coverage as u16 + 127) / 255;
        Self { a: a as u8, ..self }
    }

    /// Source-over composite of `self` onto `dst`.
    #[inline]
    pub fn over(self, dst: Rgba8) -> Rgba8 {
        match self.a {
            255 => self,
            0 => dst,
            sa => {
                let sa = sa as u32;
                let inv = 255 - sa;
                let mix = |s: u8, d: u8| ((s as u32 * sa + d as u32 * inv + 127) / 255) as u8;
                let a = sa + (dst.a as u32 * inv + 127) / 255;
                Rgba8::new(
                    mix(self.r, dst.r),
                    mix(self.g, dst.g),
                    mix(self.b, dst.b),
                    a.min(255) as u8,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_channels_saturates() {
        assert_eq!(Rgba8::from_channels(-5, 300, 128, 255), Rgba8::new(0, 255, 128, 255));
    }

    #[test]
    fn opaque_source_replaces_destination() {
        assert_eq!(Rgba8::rgb(10, 20, 30).over(Rgba8::WHITE), Rgba8::rgb(10, 20, 30));
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(Rgba8::TRANSPARENT.over(Rgba8::WHITE), Rgba8::WHITE);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let out = Rgba8::new(255, 0, 0, 128).over(Rgba8::BLACK);
        assert_eq!(out.r, 128);
        assert_eq!(out.g, 0);
        assert_eq!(out.a, 255);
    }
}
