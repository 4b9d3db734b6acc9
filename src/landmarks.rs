// Hand landmarks: the keypoint set, the model seam, and the adapter that turns a
// camera frame into a left and right hand.

use crate::config::TrackingConfig;
use crate::draw::{draw_line, fill_disc};
use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};

/// Landmarks per hand.
pub const HAND_LANDMARKS: usize = 21;

pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;

/// Bones drawn between landmarks for the debug overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // thumb
    (0, 1), (1, 2), (2, 3), (3, 4),
    // index
    (0, 5), (5, 6), (6, 7), (7, 8),
    // middle
    (5, 9), (9, 10), (10, 11), (11, 12),
    // ring
    (9, 13), (13, 14), (14, 15), (15, 16),
    // pinky + palm edge
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

const BONE_COLOR: Rgb = Rgb::new(224, 224, 224);
const JOINT_COLOR: Rgb = Rgb::new(255, 48, 48);

/// The 21 keypoints of one hand in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keypoints([Point; HAND_LANDMARKS]);

impl Keypoints {
    pub fn new(points: [Point; HAND_LANDMARKS]) -> Self {
        Self(points)
    }

    pub fn get(&self, index: usize) -> Point {
        self.0[index]
    }

    pub fn points(&self) -> &[Point; HAND_LANDMARKS] {
        &self.0
    }

    pub fn thumb_tip(&self) -> Point {
        self.0[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Point {
        self.0[INDEX_TIP]
    }

    pub fn middle_tip(&self) -> Point {
        self.0[MIDDLE_TIP]
    }
}

/// Which hand the model thinks it saw (after mirroring, so it matches the user's view).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// One hand as reported by the model: normalized [0,1] coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedHand {
    pub handedness: Handedness,
    pub score: f32,
    pub landmarks: Vec<(f32, f32)>,
}

/// Options handed to the model when the adapter is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerOptions {
    pub max_num_hands: usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::from(&TrackingConfig::default())
    }
}

impl From<&TrackingConfig> for TrackerOptions {
    fn from(cfg: &TrackingConfig) -> Self {
        Self {
            max_num_hands: cfg.max_num_hands.clamp(1, 2),
            min_detection_confidence: cfg.min_detection_confidence,
            min_tracking_confidence: cfg.min_tracking_confidence,
        }
    }
}

/// The external hand-landmark detector.
pub trait HandLandmarkModel {
    /// Called once before the first frame.
    fn configure(&mut self, _options: &TrackerOptions) {}

    /// Find hands in an (already mirrored) frame.
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<DetectedHand>, Error>;
}

/// What the adapter hands back for one frame.
#[derive(Clone, Debug)]
pub struct HandFrame {
    /// Mirrored camera frame with skeletons drawn on it.
    pub frame: FrameBuffer,
    pub left: Option<Keypoints>,
    pub right: Option<Keypoints>,
}

/// Wraps a model: mirrors, detects, converts to pixels, draws the skeleton.
pub struct LandmarkAdapter<M> {
    model: M,
    options: TrackerOptions,
}

impl<M: HandLandmarkModel> LandmarkAdapter<M> {
    pub fn new(mut model: M, options: TrackerOptions) -> Self {
        model.configure(&options);
        Self { model, options }
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Process one frame. Never fails: a model error just means no hands.
    pub fn detect(&mut self, mut frame: FrameBuffer) -> HandFrame {
        frame.mirror_horizontal();

        let hands = match self.model.detect(&frame) {
            Ok(hands) => hands,
            Err(e) => {
                log::warn!("{e}; treating frame as empty");
                Vec::new()
            }
        };
        if hands.is_empty() {
            log::trace!("no hands this frame");
        }

        let (width, height) = (frame.width, frame.height);
        let accepted: Vec<(Handedness, Keypoints)> = hands
            .iter()
            .filter(|h| h.score >= self.options.min_detection_confidence)
            .filter_map(|h| match to_pixels(h, width, height) {
                Some(keypoints) => Some((h.handedness, keypoints)),
                None => {
                    log::debug!("dropping malformed {:?} hand ({} landmarks)", h.handedness, h.landmarks.len());
                    None
                }
            })
            .take(self.options.max_num_hands)
            .collect();

        let mut left = None;
        let mut right = None;
        for (side, keypoints) in accepted {
            // A second hand claiming the same side replaces the first.
            match side {
                Handedness::Left => left = Some(keypoints),
                Handedness::Right => right = Some(keypoints),
            }
            draw_skeleton(&mut frame, &keypoints);
        }

        HandFrame { frame, left, right }
    }
}

/// Normalized coordinates outside this range are treated as garbage from the model.
const NORMALIZED_RANGE: std::ops::RangeInclusive<f32> = -1.0..=2.0;

/// None when the hand has the wrong landmark count or any coordinate is non-finite or far off-frame.
fn to_pixels(hand: &DetectedHand, width: usize, height: usize) -> Option<Keypoints> {
    if hand.landmarks.len() != HAND_LANDMARKS {
        return None;
    }
    let sane = |v: f32| v.is_finite() && NORMALIZED_RANGE.contains(&v);
    if !hand.landmarks.iter().all(|&(x, y)| sane(x) && sane(y)) {
        return None;
    }
    let mut points = [Point::default(); HAND_LANDMARKS];
    for (slot, &(nx, ny)) in points.iter_mut().zip(&hand.landmarks) {
        *slot = Point::new((nx * width as f32) as i32, (ny * height as f32) as i32);
    }
    Some(Keypoints(points))
}

/// Bones as thin lines, joints as small dots.
pub fn draw_skeleton(fb: &mut FrameBuffer, hand: &Keypoints) {
    for &(a, b) in &HAND_CONNECTIONS {
        draw_line(fb, hand.get(a), hand.get(b), BONE_COLOR.pack());
    }
    for &p in hand.points() {
        fill_disc(fb, p, 2, JOINT_COLOR.pack());
    }
}

/// Always reports the same hands; handy for tests.
#[cfg(test)]
pub(crate) struct ScriptedModel {
    pub hands: Result<Vec<DetectedHand>, String>,
    pub first_pixel: Vec<u32>,
}

#[cfg(test)]
impl HandLandmarkModel for ScriptedModel {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<DetectedHand>, Error> {
        self.first_pixel.push(frame.pixels[0]);
        self.hands.clone().map_err(Error::Detection)
    }
}
