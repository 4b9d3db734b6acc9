// The persistent drawing surface and its undo history.

use crate::error::Error;
use crate::types::{FrameBuffer, Point, Rgb};
use crate::vision::{blend_weighted, stroke_segment};
use image::RgbImage;
use std::collections::VecDeque;
use std::path::Path;

/// Something the gesture interpreter wants done to the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasCommand {
    /// Wipe everything, history included.
    Clear,
    DrawSegment { from: Point, to: Point, color: Rgb, width: u32 },
}

/// Most recent canvas snapshots, oldest dropped first once `capacity` is reached.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: VecDeque<Vec<u32>>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { snapshots: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, pixels: Vec<u32>) {
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(pixels);
    }

    /// Drop the newest snapshot and return the one beneath it.
    /// None (and nothing dropped) when fewer than two are stored.
    fn step_back(&mut self) -> Option<&Vec<u32>> {
        if self.snapshots.len() <= 1 {
            return None;
        }
        self.snapshots.pop_back();
        self.snapshots.back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// RGB raster that strokes accumulate on. Background is black.
#[derive(Clone, Debug)]
pub struct Canvas {
    raster: FrameBuffer,
    history: History,
}

impl Canvas {
    pub fn new(width: usize, height: usize, history_capacity: usize) -> Self {
        Self {
            raster: FrameBuffer::filled(width, height, crate::state::BACKGROUND),
            history: History::new(history_capacity),
        }
    }

    pub fn raster(&self) -> &FrameBuffer {
        &self.raster
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn apply(&mut self, command: CanvasCommand) {
        match command {
            CanvasCommand::Clear => self.clear(),
            CanvasCommand::DrawSegment { from, to, color, width } => {
                self.draw_segment(from, to, color, width)
            }
        }
    }

    /// Stroke from `from` to `to`, then remember the result for undo.
    pub fn draw_segment(&mut self, from: Point, to: Point, color: Rgb, width: u32) {
        stroke_segment(&mut self.raster, from, to, color, width);
        self.history.push(self.raster.pixels.clone());
    }

    /// Back to all background; history is dropped too.
    pub fn clear(&mut self) {
        self.raster.pixels.fill(crate::state::BACKGROUND.pack());
        self.history.clear();
    }

    /// Restore the snapshot before the latest one. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.step_back() {
            Some(prev) => {
                self.raster.pixels.copy_from_slice(prev);
                true
            }
            None => false,
        }
    }

    /// Write the canvas as an image; the extension picks the format.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let img = self.to_image();
        img.save(path).map_err(|source| Error::Save { path: path.to_path_buf(), source })
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.raster.width as u32, self.raster.height as u32, |x, y| {
            let c = Rgb::unpack(self.raster.pixels[y as usize * self.raster.width + x as usize]);
            image::Rgb([c.r, c.g, c.b])
        })
    }

    /// Camera frame with the canvas blended on top, for display only.
    pub fn composite_over(&self, frame: &FrameBuffer, canvas_weight: f32) -> Result<FrameBuffer, Error> {
        blend_weighted(frame, &self.raster, canvas_weight)
    }
}
