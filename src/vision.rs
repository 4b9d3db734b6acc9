// Raster operations behind the canvas: thick strokes and blending over the camera.
use crate::draw::fill_disc;
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};

/// Draw a thick segment by stamping filled discs along it.
/// `width` is the full stroke width; the stamped disc radius is half of it (at least 1px).
/// Visual: a round-capped line between the two fingertip positions.
pub fn stroke_segment(fb: &mut FrameBuffer, from: Point, to: Point, color: Rgb, width: u32) {
    let radius = (width / 2).max(1) as i32;
    let px = color.pack();

    let dx = (to.x - from.x) as f32;
    let dy = (to.y - from.y) as f32;
    let dist = (dx * dx + dy * dy).sqrt();

    // Stamp at least every half radius so the edges stay smooth.
    let spacing = (radius as f32 * 0.5).max(1.0);
    let steps = (dist / spacing).ceil().max(1.0) as i32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = from.x as f32 + dx * t;
        let y = from.y as f32 + dy * t;
        fill_disc(fb, Point::new(x.round() as i32, y.round() as i32), radius, px);
    }
}

/// Blend `overlay` over `base`: out = base * (1 - weight) + overlay * weight, per channel.
/// Neither input is touched; a fresh buffer comes back.
pub fn blend_weighted(base: &FrameBuffer, overlay: &FrameBuffer, weight: f32) -> Result<FrameBuffer, Error> {
    if !base.same_size(overlay) {
        return Err(Error::DimensionMismatch {
            what: "blend: frame vs canvas",
            expected_w: overlay.width,
            expected_h: overlay.height,
            actual_w: base.width,
            actual_h: base.height,
        });
    }

    let a = weight.clamp(0.0, 1.0);
    let inv = 1.0 - a;
    let mix = |f: u8, c: u8| (f as f32 * inv + c as f32 * a).round().clamp(0.0, 255.0) as u8;

    let pixels = base
        .pixels
        .iter()
        .zip(&overlay.pixels)
        .map(|(&pf, &pc)| {
            let f = Rgb::unpack(pf);
            let c = Rgb::unpack(pc);
            Rgb::new(mix(f.r, c.r), mix(f.g, c.g), mix(f.b, c.b)).pack()
        })
        .collect();

    Ok(FrameBuffer { width: base.width, height: base.height, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_covers_the_path_and_respects_width() {
        let mut fb = FrameBuffer::filled(40, 20, Rgb::BLACK);
        let green = Rgb::new(0, 255, 0);
        stroke_segment(&mut fb, Point::new(5, 10), Point::new(30, 10), green, 6);

        for x in 5..=30 {
            assert_eq!(fb.get(x, 10), Some(green), "gap at x={x}");
        }
        assert_eq!(fb.get(5, 13), Some(green)); // radius 3 above/below the start
        assert_eq!(fb.get(5, 14), Some(Rgb::BLACK));
    }

    #[test]
    fn zero_length_stroke_is_a_dot() {
        let mut fb = FrameBuffer::filled(10, 10, Rgb::BLACK);
        stroke_segment(&mut fb, Point::new(5, 5), Point::new(5, 5), Rgb::WHITE, 1);
        assert_eq!(fb.get(5, 5), Some(Rgb::WHITE));
        assert_eq!(fb.get(6, 5), Some(Rgb::WHITE)); // 1px minimum radius
        assert_eq!(fb.get(7, 5), Some(Rgb::BLACK));
    }

    #[test]
    fn blend_mixes_channels_by_weight() {
        let base = FrameBuffer::filled(2, 2, Rgb::new(100, 200, 0));
        let overlay = FrameBuffer::filled(2, 2, Rgb::new(0, 0, 255));
        let out = blend_weighted(&base, &overlay, 0.3).unwrap();
        // 100*0.7 = 70, 200*0.7 = 140, 255*0.3 = 76.5 -> 77
        assert!(out.pixels.iter().all(|&p| Rgb::unpack(p) == Rgb::new(70, 140, 77)));
    }

    #[test]
    fn blend_rejects_size_mismatch() {
        let base = FrameBuffer::filled(2, 2, Rgb::BLACK);
        let overlay = FrameBuffer::filled(3, 2, Rgb::BLACK);
        assert!(matches!(
            blend_weighted(&base, &overlay, 0.3),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
