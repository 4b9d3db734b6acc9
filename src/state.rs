// The drawing state the gestures steer: tool mode, palette slot, radii, and the
// bits of frame-to-frame memory (last fingertip, cooldown deadlines).

use crate::config::{CanvasConfig, GestureConfig};
use crate::types::{Point, Rgb};
use std::time::Instant;

/// Fixed palette, cycled by the thumb-to-middle pinch.
pub const PALETTE: [(&str, Rgb); 3] = [
    ("green", Rgb::new(0, 255, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("blue", Rgb::new(0, 0, 255)),
];

/// Eraser strokes paint the canvas background.
pub const BACKGROUND: Rgb = Rgb::BLACK;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Brush,
    Eraser,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Brush => Mode::Eraser,
            Mode::Eraser => Mode::Brush,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Brush => "Drawing Mode",
            Mode::Eraser => "Eraser Mode",
        }
    }
}

/// Inclusive range a radius is kept in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiusRange {
    pub min: u32,
    pub max: u32,
}

impl RadiusRange {
    /// Clamp a measured distance and truncate to whole pixels.
    pub fn clamp(self, value: f32) -> u32 {
        value.clamp(self.min as f32, self.max as f32) as u32
    }
}

/// Color and width for the next stroke segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: Rgb,
    pub width: u32,
}

#[derive(Clone, Debug)]
pub struct DrawingState {
    mode: Mode,
    color_index: usize,
    brush_radius: u32,
    eraser_radius: u32,
    brush_range: RadiusRange,
    eraser_range: RadiusRange,
    /// Right index tip seen on the previous frame.
    pub last_index_tip: Option<Point>,
    /// Left-hand input is ignored until this instant.
    pub left_cooldown_until: Option<Instant>,
    /// Mode/color pinches are ignored until this instant.
    pub right_cooldown_until: Option<Instant>,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self::new(&CanvasConfig::default(), &GestureConfig::default())
    }
}

impl DrawingState {
    /// Starts in eraser mode with the first palette color.
    pub fn new(canvas: &CanvasConfig, gestures: &GestureConfig) -> Self {
        let brush_range = RadiusRange { min: gestures.brush_min, max: gestures.brush_max };
        let eraser_range = RadiusRange { min: gestures.eraser_min, max: gestures.eraser_max };
        Self {
            mode: Mode::Eraser,
            color_index: 0,
            brush_radius: canvas.default_brush_radius,
            eraser_radius: canvas.default_eraser_radius,
            brush_range,
            eraser_range,
            last_index_tip: None,
            left_cooldown_until: None,
            right_cooldown_until: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn color(&self) -> Rgb {
        PALETTE[self.color_index].1
    }

    pub fn color_name(&self) -> &'static str {
        PALETTE[self.color_index].0
    }

    /// Advance to the next palette entry, wrapping around.
    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTE.len();
    }

    pub fn brush_radius(&self) -> u32 {
        self.brush_radius
    }

    pub fn eraser_radius(&self) -> u32 {
        self.eraser_radius
    }

    pub fn set_brush_radius(&mut self, radius: f32) {
        self.brush_radius = self.brush_range.clamp(radius);
    }

    pub fn set_eraser_radius(&mut self, radius: f32) {
        self.eraser_radius = self.eraser_range.clamp(radius);
    }

    /// Radius of whichever tool is active.
    pub fn active_radius(&self) -> u32 {
        match self.mode {
            Mode::Brush => self.brush_radius,
            Mode::Eraser => self.eraser_radius,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        match self.mode {
            Mode::Brush => StrokeStyle { color: self.color(), width: self.brush_radius },
            Mode::Eraser => StrokeStyle { color: BACKGROUND, width: self.eraser_radius },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_behaviour() {
        let s = DrawingState::default();
        assert_eq!(s.mode(), Mode::Eraser);
        assert_eq!(s.color_name(), "green");
        assert_eq!(s.brush_radius(), 5);
        assert_eq!(s.eraser_radius(), 20);
        assert!(s.last_index_tip.is_none());
    }

    #[test]
    fn next_color_cycles_through_palette() {
        let mut s = DrawingState::default();
        let start = s.color();
        for _ in 0..PALETTE.len() {
            s.next_color();
        }
        assert_eq!(s.color(), start);
        s.next_color();
        assert_eq!(s.color_name(), "red");
    }

    #[test]
    fn radii_stay_in_range() {
        let mut s = DrawingState::default();
        for d in [-5.0, 0.0, 4.9, 5.0, 12.7, 20.0, 31.0, 1e6] {
            s.set_brush_radius(d);
            assert!((5..=20).contains(&s.brush_radius()));
            s.set_eraser_radius(d);
            assert!((10..=50).contains(&s.eraser_radius()));
        }
        s.set_brush_radius(12.7);
        assert_eq!(s.brush_radius(), 12);
    }

    #[test]
    fn eraser_strokes_paint_background_at_eraser_width() {
        let mut s = DrawingState::default();
        assert_eq!(s.stroke_style(), StrokeStyle { color: BACKGROUND, width: 20 });
        s.toggle_mode();
        assert_eq!(s.stroke_style(), StrokeStyle { color: Rgb::new(0, 255, 0), width: 5 });
    }
}
