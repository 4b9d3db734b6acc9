// What you SEE:
// • Live (mirrored) camera is the base image, the canvas is blended on top.
// • Right hand index tip draws; pinch thumb+index toggles brush/eraser,
//   pinch thumb+middle picks the next color.
// • Left hand thumb-index spread sets the size; pinch thumb+middle clears.
// • Without a hand model the mouse stands in: LMB = right hand (M/N pinch),
//   RMB = left hand (scroll = spread, X = clear).
// • S saves, Z undoes, C clears, Q/ESC quits.

use air_sketch::camera::CameraCapture;
use air_sketch::config::Config;
use air_sketch::draw::Drawer;
use air_sketch::landmarks::{LandmarkAdapter, TrackerOptions};
use air_sketch::pointer::PointerHandModel;
use air_sketch::session::Session;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "air-sketch")]
#[command(version, about = "Draw on a live camera feed with hand gestures")]
struct Cli {
    /// Config file (defaults to ~/.config/air-sketch/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Camera index
    #[arg(long)]
    camera: Option<u32>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Directory for saved drawings
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(index) = self.camera {
            config.tracking.camera_index = index;
        }
        if let Some(w) = self.width {
            config.canvas.width = w;
        }
        if let Some(h) = self.height {
            config.canvas.height = h;
        }
        if let Some(dir) = &self.save_dir {
            config.output.save_directory = dir.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply(&mut config);
    config.validate_and_clamp();

    /* --- Camera + window setup --- */
    let mut cam = CameraCapture::new(config.tracking.camera_index, config.canvas.width, config.canvas.height)?;
    let (w, h) = cam.resolution();
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Air Sketch", w, h)?;

    /* --- Hands in, strokes out --- */
    let mut adapter = LandmarkAdapter::new(PointerHandModel::new(), TrackerOptions::from(&config.tracking));
    let mut session = Session::new(&config, w, h);

    log::info!("Controls:");
    log::info!("  - Draw: right index finger (or hold LMB)");
    log::info!("  - Brush/eraser: pinch right thumb+index (or LMB + M)");
    log::info!("  - Next color: pinch right thumb+middle (or LMB + N)");
    log::info!("  - Size: left thumb-index spread (or RMB + scroll)");
    log::info!("  - Clear: pinch left thumb+middle (or RMB + X, or C)");
    log::info!("  - Save: S   Undo: Z   Quit: Q / Escape");

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.quit_pressed() {
        let now = Instant::now();

        // 1) Fresh camera frame; no frame means we're done.
        let live = match cam.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("{e}; stopping");
                break;
            }
        };

        // 2) Hands (mirrored frame with skeletons comes back too).
        adapter.model_mut().update(drawer.pointer_input());
        let hands = adapter.detect(live);

        // 3) Gestures -> canvas.
        session.step(hands.left.as_ref(), hands.right.as_ref(), now);

        // 4) Keys.
        if drawer.save_pressed_once() {
            match session.save(&config.output) {
                Ok(path) => println!("Canvas saved to {}", path.display()),
                Err(e) => log::error!("{e}"),
            }
        }
        if drawer.undo_pressed_once() {
            session.undo();
        }
        if drawer.clear_pressed_once() {
            session.clear();
        }

        // 5) Composite + HUD, then show it.
        let screen = match session.render(&hands.frame, &fps_text) {
            Ok(screen) => screen,
            Err(e) => {
                log::warn!("{e}; showing camera only");
                hands.frame
            }
        };
        drawer.present(&screen)?;

        // 6) FPS counter, refreshed once per second.
        frames_this_second += 1;
        let elapsed = now.duration_since(last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            let fps = frames_this_second as f32 / elapsed.as_secs_f32();
            log::debug!("FPS: {fps:.1}");
            fps_text = format!("FPS: {fps:.1}");
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    log::info!("Air Sketch closed.");
    Ok(())
}
