// One drawing session: the drawing state, the interpreter and the canvas, owned together
// and driven a frame at a time by the main loop.

use crate::canvas::Canvas;
use crate::config::{Config, OutputConfig};
use crate::draw::{draw_crosshair, draw_text_5x7};
use crate::error::Error;
use crate::gesture::GestureInterpreter;
use crate::landmarks::Keypoints;
use crate::snapshot;
use crate::state::{DrawingState, Mode};
use crate::types::{FrameBuffer, Rgb};
use std::path::PathBuf;
use std::time::Instant;

const HUD_COLOR: Rgb = Rgb::new(255, 64, 64);

pub struct Session {
    state: DrawingState,
    interpreter: GestureInterpreter,
    canvas: Canvas,
    canvas_weight: f32,
}

impl Session {
    /// Canvas is sized to the frames it will be blended with, not necessarily the configured size.
    pub fn new(config: &Config, width: usize, height: usize) -> Self {
        Self {
            state: DrawingState::new(&config.canvas, &config.gestures),
            interpreter: GestureInterpreter::new(&config.gestures),
            canvas: Canvas::new(width, height, config.canvas.history_capacity),
            canvas_weight: config.canvas.canvas_weight,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Interpret this frame's hands and apply the result. Returns how many commands ran.
    pub fn step(&mut self, left: Option<&Keypoints>, right: Option<&Keypoints>, now: Instant) -> usize {
        let commands = self.interpreter.interpret(&mut self.state, left, right, now);
        let n = commands.len();
        for cmd in commands {
            self.canvas.apply(cmd);
        }
        n
    }

    pub fn undo(&mut self) {
        if !self.canvas.undo() {
            log::debug!("nothing to undo");
        }
    }

    pub fn clear(&mut self) {
        self.canvas.clear();
        log::info!("Canvas cleared");
    }

    pub fn save(&self, output: &OutputConfig) -> Result<PathBuf, Error> {
        snapshot::save_canvas(&self.canvas, output)
    }

    /// Blend the canvas over `frame` and draw the HUD on top.
    pub fn render(&self, frame: &FrameBuffer, status: &str) -> Result<FrameBuffer, Error> {
        let mut screen = self.canvas.composite_over(frame, self.canvas_weight)?;

        let mode = self.state.mode();
        let hud = format!(
            "{} | Color: {} | Size: {}",
            mode.label(),
            self.state.color_name(),
            self.state.active_radius()
        );
        draw_text_5x7(&mut screen, 10, 10, &hud, HUD_COLOR.pack());
        if !status.is_empty() {
            draw_text_5x7(&mut screen, 10, 22, status, HUD_COLOR.pack());
        }

        if let Some(tip) = self.state.last_index_tip {
            let color = match mode {
                Mode::Brush => self.state.color(),
                Mode::Eraser => Rgb::WHITE,
            };
            draw_crosshair(&mut screen, tip, 12, color.pack());
        }
        Ok(screen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use std::time::Duration;

    fn pointing(x: i32, y: i32) -> Keypoints {
        let mut pts = [Point::new(-500, -500); 21];
        pts[8] = Point::new(x, y);
        pts[12] = Point::new(-900, 900);
        Keypoints::new(pts)
    }

    #[test]
    fn strokes_land_on_the_canvas_and_undo_steps_back() {
        let mut s = Session::new(&Config::default(), 100, 100);
        let t0 = Instant::now();
        s.step(None, Some(&pointing(10, 10)), t0);
        s.step(None, Some(&pointing(20, 10)), t0 + Duration::from_millis(30));
        s.step(None, Some(&pointing(30, 10)), t0 + Duration::from_millis(60));
        assert_eq!(s.canvas().history().len(), 2);

        s.undo();
        assert_eq!(s.canvas().history().len(), 1);
        s.clear();
        assert!(s.canvas().history().is_empty());
    }

    #[test]
    fn render_matches_frame_size_and_rejects_mismatch() {
        let s = Session::new(&Config::default(), 64, 48);
        let ok = s.render(&FrameBuffer::filled(64, 48, Rgb::BLACK), "FPS: 30.0").unwrap();
        assert_eq!((ok.width, ok.height), (64, 48));
        assert!(ok.pixels.iter().any(|&p| p == HUD_COLOR.pack()));

        assert!(s.render(&FrameBuffer::filled(32, 48, Rgb::BLACK), "").is_err());
    }
}
