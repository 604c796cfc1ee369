use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use softblit::prelude::*;
use softblit::Config;

/// Marker positions advance by this many pixels per key press.
const MARKER_STEP: u8 = 20;

/// Viewer state that outlives a single key press.
#[derive(Default)]
struct Session {
    last_command: Option<DrawCommand>,
    marker_row: u8,
    marker_column: u8,
    captures: u32,
}

impl Session {
    fn command_for(&mut self, key: Key) -> Option<DrawCommand> {
        let command = match key {
            Key::Clear => DrawCommand::Clear,
            Key::LineSet => DrawCommand::LineSet,
            Key::Wireframe => DrawCommand::Wireframe,
            Key::Shaded => DrawCommand::Shaded,
            Key::ShadedDepth => DrawCommand::ShadedDepth,
            Key::HorizontalMarker => {
                self.marker_row = self.marker_row.wrapping_add(MARKER_STEP);
                DrawCommand::HorizontalMarker(self.marker_row as i32)
            }
            Key::VerticalMarker => {
                self.marker_column = self.marker_column.wrapping_add(MARKER_STEP);
                DrawCommand::VerticalMarker(self.marker_column as i32)
            }
            Key::Capture => return None,
        };
        Some(command)
    }

    fn next_capture_path(&mut self, config: &Config) -> PathBuf {
        self.captures += 1;
        config
            .capture_dir
            .join(format!("softblit-{:04}.png", self.captures))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let model = match &config.model {
        Some(path) => {
            Model::from_obj(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Model::cube(),
    };
    info!(
        "model {} with {} faces, line algorithm {}",
        model.name(),
        model.face_count(),
        config.line
    );

    let mut window = Window::new("softblit", config.width, config.height).map_err(|e| anyhow!(e))?;
    let mut engine = Engine::from_config(&config);
    let mut frame_limiter = FrameLimiter::new(&window);
    let mut session = Session::default();

    engine.execute(DrawCommand::Clear, &model);

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                window.resize(width, height).map_err(|e| anyhow!(e))?;
                engine.resize(width, height);
                // The buffers start out zeroed; repaint what was on screen.
                let command = session.last_command.unwrap_or(DrawCommand::Clear);
                engine.execute(command, &model);
            }
            WindowEvent::Key(Key::Capture) => {
                let path = session.next_capture_path(&config);
                if let Err(e) = engine.save_capture(&path) {
                    error!("failed to save {}: {e}", path.display());
                }
            }
            WindowEvent::Key(key) => {
                if let Some(command) = session.command_for(key) {
                    engine.execute(command, &model);
                    session.last_command = Some(command);
                }
            }
            WindowEvent::None => {}
        }

        window.present(engine.framebuffer()).map_err(|e| anyhow!(e))?;
        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
