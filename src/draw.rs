// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the camera image with the canvas blended on top.
// 2) Lines, filled discs and a crosshair for strokes and the hand skeleton.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the video.

use crate::error::Error;
use crate::pointer::PointerInput;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the canvas.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Q or ESC ends the session.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape) || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
    }

    /// S writes the canvas to disk.
    pub fn save_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Z steps back one stroke segment.
    pub fn undo_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Z, KeyRepeat::No)
    }

    /// C wipes the canvas without a gesture.
    pub fn clear_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0), y.max(0.0)))
    }

    /// Mouse + keys packed for the pointer hand model.
    pub fn pointer_input(&self) -> PointerInput {
        let (w, h) = self.window.get_size();
        PointerInput {
            pos: self.mouse_pos(),
            width: w,
            height: h,
            left_down: self.window.get_mouse_down(MouseButton::Left),
            right_down: self.window.get_mouse_down(MouseButton::Right),
            pinch_index: self.window.is_key_down(Key::M),
            pinch_middle: self.window.is_key_down(Key::N),
            pinch_clear: self.window.is_key_down(Key::X),
            scroll: self.window.get_scroll_wheel().map_or(0.0, |(_, dy)| dy),
        }
    }
}

/* ---------- Software drawing: pixels, lines, discs, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between two points using Bresenham.
/// Visual: a straight 1-pixel line appears on top of the image.
pub fn draw_line(fb: &mut FrameBuffer, from: Point, to: Point, color: u32) {
    let (mut x0, mut y0, x1, y1) = (from.x, from.y, to.x, to.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Fill a solid disc. Only the part inside the buffer is touched.
pub fn fill_disc(fb: &mut FrameBuffer, center: Point, radius: i32, color: u32) {
    if radius < 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    let r2 = radius * radius;
    let x_lo = (center.x - radius).max(0);
    let x_hi = (center.x + radius).min(fb.width as i32 - 1);
    let y_lo = (center.y - radius).max(0);
    let y_hi = (center.y + radius).min(fb.height as i32 - 1);

    for y in y_lo..=y_hi {
        let dy = y - center.y;
        let row = y as usize * fb.width;
        for x in x_lo..=x_hi {
            let dx = x - center.x;
            if dx * dx + dy * dy <= r2 {
                fb.pixels[row + x as usize] = color;
            }
        }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) marks the fingertip.
pub fn draw_crosshair(fb: &mut FrameBuffer, center: Point, size: i32, color: u32) {
    let Point { x: cx, y: cy } = center;
    draw_line(fb, Point::new(cx - size, cy), Point::new(cx - 2, cy), color);
    draw_line(fb, Point::new(cx + 2, cy), Point::new(cx + size, cy), color);
    draw_line(fb, Point::new(cx, cy - size), Point::new(cx, cy - 2), color);
    draw_line(fb, Point::new(cx, cy + 2), Point::new(cx, cy + size), color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        // Shadow first, then the glyph on top.
        for (offset, c) in [(1, 0x0000_0000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    #[test]
    fn line_hits_both_endpoints() {
        let mut fb = FrameBuffer::filled(10, 10, Rgb::BLACK);
        draw_line(&mut fb, Point::new(1, 1), Point::new(8, 5), 7);
        assert_eq!(fb.pixels[1 * 10 + 1], 7);
        assert_eq!(fb.pixels[5 * 10 + 8], 7);
    }

    #[test]
    fn disc_is_clipped_at_the_border() {
        let mut fb = FrameBuffer::filled(8, 8, Rgb::BLACK);
        fill_disc(&mut fb, Point::new(0, 0), 3, 1);
        assert_eq!(fb.pixels[0], 1);
        assert_eq!(fb.pixels[3], 1); // (3,0) is on the rim
        assert_eq!(fb.pixels[3 * 8 + 3], 0); // corner outside the circle
        fill_disc(&mut fb, Point::new(-50, -50), 3, 2); // fully outside: no panic
    }

    #[test]
    fn text_draws_something_for_hud_strings() {
        let mut fb = FrameBuffer::filled(200, 20, Rgb::BLACK);
        draw_text_5x7(&mut fb, 2, 2, "Drawing Mode | Color: green", 0x00FF_FFFF);
        assert!(fb.pixels.iter().any(|&p| p == 0x00FF_FFFF));
    }
}
