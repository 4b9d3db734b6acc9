// Mouse-driven stand-in for a hand-landmark model.
//
// Lets the app run (and be poked at) without a neural detector:
// - hold LMB: a right hand whose index tip follows the pointer (draws)
//   - plus M: thumb touches index (brush/eraser toggle)
//   - plus N: middle finger touches thumb (next color)
// - hold RMB: a left hand at the pointer; scroll changes the thumb-index spread
//   - plus X: middle finger touches thumb (clear)

use crate::error::Error;
use crate::landmarks::{
    DetectedHand, HAND_LANDMARKS, HandLandmarkModel, Handedness, INDEX_TIP, MIDDLE_TIP, THUMB_TIP,
};
use crate::types::FrameBuffer;

/// Right hand pointing up, pixel offsets from the index tip.
const RIGHT_HAND_TEMPLATE: [(f32, f32); HAND_LANDMARKS] = [
    (0.0, 160.0),                                              // wrist
    (-30.0, 140.0), (-55.0, 115.0), (-75.0, 95.0), (-90.0, 80.0), // thumb
    (-10.0, 80.0), (-5.0, 50.0), (-2.0, 25.0), (0.0, 0.0),     // index
    (15.0, 80.0), (20.0, 45.0), (25.0, 20.0), (30.0, -5.0),    // middle
    (38.0, 85.0), (45.0, 55.0), (50.0, 35.0), (55.0, 15.0),    // ring
    (58.0, 95.0), (68.0, 75.0), (75.0, 60.0), (80.0, 45.0),    // pinky
];

/// A pinch leaves this many pixels between the fingertips.
const PINCH_GAP: f32 = 8.0;
const SPREAD_MIN: f32 = 0.0;
const SPREAD_MAX: f32 = 120.0;
const SPREAD_PER_SCROLL: f32 = 4.0;

/// One frame's worth of mouse/keyboard state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer in window pixels.
    pub pos: Option<(f32, f32)>,
    pub width: usize,
    pub height: usize,
    pub left_down: bool,
    pub right_down: bool,
    pub pinch_index: bool,
    pub pinch_middle: bool,
    pub pinch_clear: bool,
    pub scroll: f32,
}

#[derive(Debug, Clone)]
pub struct PointerHandModel {
    input: PointerInput,
    /// Left-hand thumb-to-index distance in pixels.
    spread: f32,
}

impl Default for PointerHandModel {
    fn default() -> Self {
        Self { input: PointerInput::default(), spread: 30.0 }
    }
}

impl PointerHandModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest input; call once per frame before detection.
    pub fn update(&mut self, input: PointerInput) {
        if input.scroll != 0.0 {
            self.spread = (self.spread + input.scroll * SPREAD_PER_SCROLL).clamp(SPREAD_MIN, SPREAD_MAX);
            log::debug!("pointer left-hand spread now {:.0}px", self.spread);
        }
        self.input = input;
    }

    pub fn spread(&self) -> f32 {
        self.spread
    }

    fn right_hand(&self, tip: (f32, f32)) -> Vec<(f32, f32)> {
        let mut pts = place(tip, 1.0);
        if self.input.pinch_index {
            pts[THUMB_TIP] = (pts[INDEX_TIP].0 - PINCH_GAP, pts[INDEX_TIP].1);
        }
        if self.input.pinch_middle {
            pts[MIDDLE_TIP] = (pts[THUMB_TIP].0 + PINCH_GAP, pts[THUMB_TIP].1);
        }
        pts
    }

    fn left_hand(&self, tip: (f32, f32)) -> Vec<(f32, f32)> {
        // Mirror image of the right hand, thumb pulled to `spread` from the index tip.
        let mut pts = place(tip, -1.0);
        let index = pts[INDEX_TIP];
        pts[THUMB_TIP] = (index.0 + self.spread, index.1);
        if self.input.pinch_clear {
            pts[MIDDLE_TIP] = (pts[THUMB_TIP].0, pts[THUMB_TIP].1 + PINCH_GAP);
        }
        pts
    }
}

/// Template anchored at `tip`; `flip` = -1 mirrors it for a left hand.
fn place(tip: (f32, f32), flip: f32) -> Vec<(f32, f32)> {
    RIGHT_HAND_TEMPLATE
        .iter()
        .map(|&(dx, dy)| (tip.0 + dx * flip, tip.1 + dy))
        .collect()
}

fn normalize(points: Vec<(f32, f32)>, width: usize, height: usize) -> Vec<(f32, f32)> {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    points.into_iter().map(|(x, y)| (x / w, y / h)).collect()
}

impl HandLandmarkModel for PointerHandModel {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<DetectedHand>, Error> {
        let Some((mx, my)) = self.input.pos else {
            return Ok(Vec::new());
        };

        // Window and frame can differ if the window was resized.
        let sx = frame.width as f32 / self.input.width.max(1) as f32;
        let sy = frame.height as f32 / self.input.height.max(1) as f32;
        let tip = (mx * sx, my * sy);

        let mut hands = Vec::new();
        if self.input.left_down {
            hands.push(DetectedHand {
                handedness: Handedness::Right,
                score: 1.0,
                landmarks: normalize(self.right_hand(tip), frame.width, frame.height),
            });
        }
        if self.input.right_down {
            hands.push(DetectedHand {
                handedness: Handedness::Left,
                score: 1.0,
                landmarks: normalize(self.left_hand(tip), frame.width, frame.height),
            });
        }
        Ok(hands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureInterpreter;
    use crate::landmarks::{LandmarkAdapter, TrackerOptions};
    use crate::state::{DrawingState, Mode};
    use crate::types::{Point, Rgb};
    use std::time::Instant;

    fn input(pos: (f32, f32)) -> PointerInput {
        PointerInput { pos: Some(pos), width: 640, height: 480, ..PointerInput::default() }
    }

    fn adapter() -> LandmarkAdapter<PointerHandModel> {
        LandmarkAdapter::new(PointerHandModel::new(), TrackerOptions::default())
    }

    fn frame() -> FrameBuffer {
        FrameBuffer::filled(640, 480, Rgb::BLACK)
    }

    #[test]
    fn no_buttons_no_hands() {
        let mut a = adapter();
        a.model_mut().update(input((100.0, 100.0)));
        let out = a.detect(frame());
        assert!(out.left.is_none() && out.right.is_none());
    }

    #[test]
    fn left_button_puts_right_index_at_pointer() {
        let mut a = adapter();
        a.model_mut().update(PointerInput { left_down: true, ..input((320.0, 240.0)) });
        let right = a.detect(frame()).right.expect("right hand");
        assert_eq!(right.index_tip(), Point::new(320, 240));
        assert!(right.thumb_tip().distance(right.index_tip()) > 30.0);
        assert!(right.thumb_tip().distance(right.middle_tip()) > 30.0);
    }

    #[test]
    fn m_key_toggles_mode_through_the_interpreter() {
        let mut a = adapter();
        let g = GestureInterpreter::default();
        let mut s = DrawingState::default();
        a.model_mut().update(PointerInput { left_down: true, pinch_index: true, ..input((300.0, 300.0)) });
        let hands = a.detect(frame());
        g.interpret(&mut s, hands.left.as_ref(), hands.right.as_ref(), Instant::now());
        assert_eq!(s.mode(), Mode::Brush);
    }

    #[test]
    fn scroll_changes_left_spread() {
        let mut a = adapter();
        a.model_mut().update(PointerInput { right_down: true, scroll: 2.0, ..input((300.0, 300.0)) });
        assert_eq!(a.model_mut().spread(), 38.0);
        let left = a.detect(frame()).left.expect("left hand");
        let d = left.thumb_tip().distance(left.index_tip());
        assert!((d - 38.0).abs() <= 1.5, "spread {d}");

        a.model_mut().update(PointerInput { scroll: -100.0, ..input((300.0, 300.0)) });
        assert_eq!(a.model_mut().spread(), 0.0);
    }

    #[test]
    fn x_key_pinches_left_middle_to_thumb() {
        let mut a = adapter();
        a.model_mut().update(PointerInput { right_down: true, pinch_clear: true, ..input((300.0, 300.0)) });
        let left = a.detect(frame()).left.expect("left hand");
        assert!(left.thumb_tip().distance(left.middle_tip()) < 30.0);
    }
}
