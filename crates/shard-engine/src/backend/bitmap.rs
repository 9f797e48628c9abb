use crate::coords::Rgba8;

/// Owned RGBA pixel buffer, row-major, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Bitmap {
    /// Creates a transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba8::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Takes over the pixels of a decoded image.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Rgba8::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self { width, height, pixels }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Pixel at `(x, y)`, or `None` outside the bitmap.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<Rgba8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Composites `color` over the pixel at `(x, y)`. Out-of-range is a no-op.
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Rgba8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.over(self.pixels[i]);
        }
    }

    pub fn fill(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    pub fn copy_from(&mut self, other: &Bitmap) {
        debug_assert_eq!(self.size(), other.size());
        self.pixels.copy_from_slice(&other.pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_access_is_ignored() {
        let mut bm = Bitmap::new(2, 2);
        bm.blend(-1, 0, Rgba8::WHITE);
        bm.blend(2, 1, Rgba8::WHITE);
        assert_eq!(bm.get(5, 5), None);
        assert!(bm.pixels().iter().all(|&p| p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn from_image_keeps_row_major_order() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([1, 2, 3, 4]));
        let bm = Bitmap::from_image(img);
        assert_eq!(bm.size(), (2, 1));
        assert_eq!(bm.get(1, 0), Some(Rgba8::new(1, 2, 3, 4)));
    }
}
