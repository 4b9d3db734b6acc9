// Draw on a live camera feed with hand gestures.
//
// A landmark model finds hands in each frame (`landmarks`), the gesture interpreter
// turns fingertip positions into canvas commands (`gesture`), and the canvas keeps the
// strokes between frames (`canvas`). The binary wires these to a camera and a window.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod gesture;
pub mod landmarks;
pub mod pointer;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod types;
pub mod vision;

pub use config::Config;
pub use error::Error;
