// Turns hand keypoints into drawing actions.
//
// Left hand: thumb-to-index spread sets the active tool's radius, and touching thumb
// to middle finger clears the canvas. Right hand: the index tip draws, a thumb-to-index
// pinch toggles brush/eraser, a thumb-to-middle pinch picks the next color.
//
// Pinches only count when the index tip is roughly still, and each trigger starts a
// cooldown so a held pinch fires once. Cooldowns compare against the `now` the caller
// passes in; nothing here sleeps.

use crate::canvas::CanvasCommand;
use crate::config::GestureConfig;
use crate::landmarks::Keypoints;
use crate::state::{DrawingState, Mode};
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    pinch_threshold: f32,
    speed_threshold: f32,
    cooldown: Duration,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(&GestureConfig::default())
    }
}

impl GestureInterpreter {
    pub fn new(cfg: &GestureConfig) -> Self {
        Self {
            pinch_threshold: cfg.pinch_threshold,
            speed_threshold: cfg.speed_threshold,
            cooldown: Duration::from_millis(cfg.cooldown_ms),
        }
    }

    /// Process one frame's hands. Updates `state` and returns what to do to the canvas.
    pub fn interpret(
        &self,
        state: &mut DrawingState,
        left: Option<&Keypoints>,
        right: Option<&Keypoints>,
        now: Instant,
    ) -> Vec<CanvasCommand> {
        let mut commands = Vec::new();

        if let Some(hand) = left {
            self.left_hand(state, hand, now, &mut commands);
        }

        match right {
            Some(hand) => self.right_hand(state, hand, now, &mut commands),
            // Forget the tip so re-acquiring the hand elsewhere doesn't draw a long jump.
            None => state.last_index_tip = None,
        }

        commands
    }

    fn left_hand(&self, state: &mut DrawingState, hand: &Keypoints, now: Instant, out: &mut Vec<CanvasCommand>) {
        if cooling_down(state.left_cooldown_until, now) {
            return;
        }

        let spread = hand.thumb_tip().distance(hand.index_tip());
        let thumb_middle = hand.thumb_tip().distance(hand.middle_tip());

        match state.mode() {
            Mode::Eraser => state.set_eraser_radius(spread),
            Mode::Brush => state.set_brush_radius(spread),
        }

        if thumb_middle < self.pinch_threshold {
            log::debug!("left pinch ({thumb_middle:.1}px): clearing canvas");
            out.push(CanvasCommand::Clear);
            state.left_cooldown_until = Some(now + self.cooldown);
        }
    }

    fn right_hand(&self, state: &mut DrawingState, hand: &Keypoints, now: Instant, out: &mut Vec<CanvasCommand>) {
        let tip = hand.index_tip();
        let thumb_index = hand.thumb_tip().distance(tip);
        let thumb_middle = hand.thumb_tip().distance(hand.middle_tip());
        let speed = state.last_index_tip.map_or(0.0, |prev| prev.distance(tip));

        // Gate once for the whole frame: one pinch may flip mode and color together.
        let gated = speed <= self.speed_threshold && !cooling_down(state.right_cooldown_until, now);
        if gated {
            let mut triggered = false;
            if thumb_index < self.pinch_threshold {
                state.toggle_mode();
                log::debug!("right thumb-index pinch: now {}", state.mode().label());
                triggered = true;
            }
            if thumb_middle < self.pinch_threshold {
                state.next_color();
                log::debug!("right thumb-middle pinch: color {}", state.color_name());
                triggered = true;
            }
            if triggered {
                state.right_cooldown_until = Some(now + self.cooldown);
            }
        } else if speed > self.speed_threshold {
            log::trace!("index tip moving {speed:.1}px/frame, pinches ignored");
        }

        if let Some(prev) = state.last_index_tip {
            let style = state.stroke_style();
            out.push(CanvasCommand::DrawSegment { from: prev, to: tip, color: style.color, width: style.width });
        }
        state.last_index_tip = Some(tip);
    }
}

fn cooling_down(until: Option<Instant>, now: Instant) -> bool {
    until.is_some_and(|t| now < t)
}
