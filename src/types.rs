// Core pixel types shared by the camera, the canvas and the window.

/// A packed RGB raster, one `u32` per pixel laid out as 0x00RRGGBB (what minifb wants).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // pixels per row
    pub height: usize,     // rows
    pub pixels: Vec<u32>,  // row-major, length = width * height
}

impl FrameBuffer {
    /// A buffer of the given size filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.pack(); width * height],
        }
    }

    /// Same width and height as `other`?
    pub fn same_size(&self, other: &FrameBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Pixel at (x,y), or None outside the buffer.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::unpack(self.pixels[y * self.width + x]))
    }

    /// Flip every row left-to-right (selfie view).
    pub fn mirror_horizontal(&mut self) {
        if self.width == 0 {
            return;
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.reverse();
        }
    }
}

/// One 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into 0x00RRGGBB.
    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn unpack(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

/// Integer pixel coordinate; may lie outside the frame (e.g. a hand half out of view).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance(self, other: Point) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_keeps_channels() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.pack(), 0x0012_3456);
        assert_eq!(Rgb::unpack(0x0012_3456), c);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative() {
        let pts = [
            Point::new(0, 0),
            Point::new(3, 4),
            Point::new(-7, 12),
            Point::new(100, -100),
        ];
        for a in pts {
            for b in pts {
                assert!(a.distance(b) >= 0.0);
                assert_eq!(a.distance(b), b.distance(a));
            }
        }
        assert_eq!(Point::new(0, 0).distance(Point::new(3, 4)), 5.0);
    }

    #[test]
    fn mirror_reverses_each_row() {
        let mut fb = FrameBuffer { width: 3, height: 2, pixels: vec![1, 2, 3, 4, 5, 6] };
        fb.mirror_horizontal();
        assert_eq!(fb.pixels, vec![3, 2, 1, 6, 5, 4]);
    }
}
