//! HEARTQUEST: a small third-person puzzle walk
//!
//! Walk the cat through the lounge, hallway and sanctuary. Find the
//! magnifying glass, read the code, open the safe, and take the key to
//! the heart.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod math;
mod world;
mod game;
mod input;

use std::path::Path;
use macroquad::prelude::*;
use game::{draw_scene, GameSession, Hud};
use input::InputState;
use world::{default_level, load_level, Level, LevelError};

/// Level file picked up at startup when present
const LEVEL_PATH: &str = "assets/levels/house.ron";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("HEARTQUEST v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Load and build a level file. Any defect, from a bad byte to a blocked
/// spawn, comes back as a `LevelError`.
fn load_session(path: &Path) -> Result<(Level, GameSession), LevelError> {
    let level = load_level(path)?;
    let session = GameSession::from_level(&level)?;
    Ok((level, session))
}

/// Start from the level file at `path` if there is a usable one, otherwise
/// from the built-in house
fn start_session(path: &Path) -> Result<(Level, GameSession), LevelError> {
    if path.exists() {
        match load_session(path) {
            Ok(started) => return Ok(started),
            Err(e) => log::warn!("failed to load {}: {}; using built-in house", path.display(), e),
        }
    } else {
        log::info!("no level at {}, using built-in house", path.display());
    }

    let level = default_level();
    let session = GameSession::from_level(&level)?;
    Ok((level, session))
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let (level, mut session) = match start_session(Path::new(LEVEL_PATH)) {
        Ok(started) => started,
        Err(e) => {
            log::error!("cannot start: {}", e);
            return;
        }
    };

    let mut input = InputState::new();
    let mut hud = Hud::new();

    loop {
        input.poll();

        let hud_had_input = hud.captures_input();
        hud.handle_input(&input);

        let mut snapshot = input.snapshot();
        if hud_had_input {
            snapshot.interact = false;
        }

        let report = session.tick(&snapshot, get_frame_time());

        for step in session.events.footstep.drain() {
            log::debug!("footstep at ({:.1}, {:.1})", step.position.x, step.position.z);
        }
        for event in session.events.interaction.drain() {
            hud.on_interaction(&event);
        }
        session.events.clear_all();

        draw_scene(&level, session.interactions(), session.player().state(), &report.camera);
        hud.draw(session.interactions().hover_name(), input.has_gamepad());

        next_frame().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::world::save_level;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_built_in_house() {
        let dir = TempDir::new().unwrap();
        let (level, _) = start_session(&dir.path().join("house.ron")).unwrap();
        assert_eq!(level, default_level());
    }

    #[test]
    fn test_good_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("house.ron");
        let mut custom = default_level();
        custom.name = "Cottage".to_string();
        save_level(&custom, &path).unwrap();

        let (level, _) = start_session(&path).unwrap();
        assert_eq!(level.name, "Cottage");
    }

    #[test]
    fn test_every_bad_file_falls_back() {
        let dir = TempDir::new().unwrap();

        // Unparseable
        let garbage = dir.path().join("garbage.ron");
        std::fs::write(&garbage, b"(not a level").unwrap();
        assert_eq!(start_session(&garbage).unwrap().0, default_level());

        // Valid file, but the spawn sits under the lounge table
        let blocked = dir.path().join("blocked.ron");
        let mut level = default_level();
        level.name = "Blocked".to_string();
        level.spawn = Vec3::new(-8.0, 0.0, 5.0);
        save_level(&level, &blocked).unwrap();
        assert!(matches!(load_session(&blocked), Err(LevelError::World(_))));
        assert_eq!(start_session(&blocked).unwrap().0, default_level());

        // Valid file, but the heart is missing
        let missing = dir.path().join("missing.ron");
        let mut level = default_level();
        level.props.pop();
        save_level(&level, &missing).unwrap();
        assert_eq!(start_session(&missing).unwrap().0, default_level());
    }
}
