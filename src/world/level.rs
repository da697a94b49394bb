//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression

use std::fs;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use crate::math::Vec3;
use super::{Level, PlayerSettings, CameraSettings, WorldError};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of rooms in a level
    pub const MAX_ROOMS: usize = 64;
    /// Maximum number of free-standing walls
    pub const MAX_WALLS: usize = 1024;
    /// Maximum number of tables
    pub const MAX_TABLES: usize = 256;
    /// Maximum number of props
    pub const MAX_PROPS: usize = 64;
    /// Maximum string length for names
    pub const MAX_STRING_LEN: usize = 256;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 100_000.0;
}

/// Error type for level loading
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("World error: {0}")]
    World(#[from] WorldError),
}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_vec(v: Vec3, context: &str) -> Result<(), String> {
    for (axis, value) in [("x", v.x), ("y", v.y), ("z", v.z)] {
        if !is_valid_float(value) {
            return Err(format!("{}: invalid {} = {}", context, axis, value));
        }
    }
    Ok(())
}

fn validate_name(name: &str, context: &str) -> Result<(), String> {
    if name.len() > limits::MAX_STRING_LEN {
        return Err(format!("{}: name too long ({} > {})",
            context, name.len(), limits::MAX_STRING_LEN));
    }
    Ok(())
}

fn validate_positive(value: f32, context: &str) -> Result<(), String> {
    if !is_valid_float(value) || value <= 0.0 {
        return Err(format!("{}: must be positive, got {}", context, value));
    }
    Ok(())
}

fn validate_player_settings(s: &PlayerSettings) -> Result<(), String> {
    validate_positive(s.collider_half_width, "player collider_half_width")?;
    validate_positive(s.collider_height, "player collider_height")?;
    validate_positive(s.footstep_interval, "player footstep_interval")?;
    validate_positive(s.interaction_radius, "player interaction_radius")?;
    if !is_valid_float(s.walk_speed) || s.walk_speed < 0.0 {
        return Err(format!("player walk_speed: invalid {}", s.walk_speed));
    }
    if !is_valid_float(s.turn_speed) || s.turn_speed < 0.0 {
        return Err(format!("player turn_speed: invalid {}", s.turn_speed));
    }
    Ok(())
}

fn validate_camera_settings(s: &CameraSettings) -> Result<(), String> {
    validate_vec(s.offset, "camera offset")?;
    if !is_valid_float(s.ray_height) || !is_valid_float(s.look_height) {
        return Err("camera: invalid height".to_string());
    }
    if !is_valid_float(s.backoff) || s.backoff < 0.0 {
        return Err(format!("camera backoff: invalid {}", s.backoff));
    }
    if !(s.follow_blend > 0.0 && s.follow_blend <= 1.0) {
        return Err(format!("camera follow_blend: must be in (0, 1], got {}", s.follow_blend));
    }
    Ok(())
}

/// Validate a level after loading
pub fn validate_level(level: &Level) -> Result<(), LevelError> {
    validate_level_inner(level).map_err(LevelError::Validation)
}

fn validate_level_inner(level: &Level) -> Result<(), String> {
    validate_name(&level.name, "level")?;

    if level.rooms.len() > limits::MAX_ROOMS {
        return Err(format!("too many rooms ({} > {})", level.rooms.len(), limits::MAX_ROOMS));
    }
    if level.walls.len() > limits::MAX_WALLS {
        return Err(format!("too many walls ({} > {})", level.walls.len(), limits::MAX_WALLS));
    }
    if level.tables.len() > limits::MAX_TABLES {
        return Err(format!("too many tables ({} > {})", level.tables.len(), limits::MAX_TABLES));
    }
    if level.props.len() > limits::MAX_PROPS {
        return Err(format!("too many props ({} > {})", level.props.len(), limits::MAX_PROPS));
    }

    validate_vec(level.spawn, "spawn")?;
    if !is_valid_float(level.spawn_yaw) {
        return Err(format!("spawn_yaw: invalid {}", level.spawn_yaw));
    }

    for (i, room) in level.rooms.iter().enumerate() {
        let ctx = format!("room[{}]", i);
        validate_name(&room.name, &ctx)?;
        if !is_valid_float(room.center_x) || !is_valid_float(room.center_z) {
            return Err(format!("{}: invalid center", ctx));
        }
        validate_positive(room.width, &format!("{} width", ctx))?;
        validate_positive(room.depth, &format!("{} depth", ctx))?;
    }

    for (i, wall) in level.walls.iter().enumerate() {
        let ctx = format!("wall[{}]", i);
        validate_vec(wall.center, &ctx)?;
        validate_vec(wall.size, &ctx)?;
        if wall.size.x < 0.0 || wall.size.y < 0.0 || wall.size.z < 0.0 {
            return Err(format!("{}: negative size", ctx));
        }
    }

    for (i, table) in level.tables.iter().enumerate() {
        let ctx = format!("table[{}]", i);
        if !is_valid_float(table.x) || !is_valid_float(table.z) {
            return Err(format!("{}: invalid position", ctx));
        }
        validate_positive(table.radius, &format!("{} radius", ctx))?;
    }

    for (i, prop) in level.props.iter().enumerate() {
        let ctx = format!("prop[{}]", i);
        validate_name(&prop.name, &ctx)?;
        validate_vec(prop.position, &ctx)?;
    }

    validate_player_settings(&level.player_settings)?;
    validate_camera_settings(&level.camera_settings)?;
    Ok(())
}

/// Load a level from a RON file (plain or brotli-compressed)
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, LevelError> {
    let bytes = fs::read(path.as_ref())?;
    let level = parse_level_data(&bytes)?;
    log::info!("loaded level '{}' from {}", level.name, path.as_ref().display());
    Ok(level)
}

/// Parse level data from bytes
pub fn parse_level_data(bytes: &[u8]) -> Result<Level, LevelError> {
    // Detect format: RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes.first().map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t').unwrap_or(false);

    let contents = if is_plain_ron {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| LevelError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e)
            )))?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(bytes), &mut decompressed)
            .map_err(|e| LevelError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e)
            )))?;
        String::from_utf8(decompressed)
            .map_err(|e| LevelError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e)
            )))?
    };

    let level: Level = ron::from_str(&contents)?;

    // Validate level to prevent malicious files
    validate_level(&level)?;

    Ok(level)
}

/// Serialize a level to pretty RON text
pub fn level_to_ron(level: &Level) -> Result<String, LevelError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(level, config)?)
}

/// Serialize a level to compressed bytes
pub fn serialize_level(level: &Level) -> Result<Vec<u8>, LevelError> {
    let ron_string = level_to_ron(level)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(&mut Cursor::new(ron_string.as_bytes()), &mut compressed, &brotli::enc::BrotliEncoderParams {
        quality: 6,
        lgwin: 22,
        ..Default::default()
    }).map_err(|e| LevelError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("brotli compression failed: {}", e)
    )))?;

    Ok(compressed)
}

/// Save a level to disk (brotli-compressed RON)
pub fn save_level<P: AsRef<Path>>(level: &Level, path: P) -> Result<(), LevelError> {
    let data = serialize_level(level)?;
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path.as_ref(), data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::default_level;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_compressed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("levels/house.ron");
        let level = default_level();

        save_level(&level, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        // Compressed output is not plain RON
        assert_ne!(bytes.first(), Some(&b'('));

        let loaded = load_level(&path).unwrap();
        assert_eq!(loaded, level);
    }

    #[test]
    fn test_parse_plain_ron() {
        let text = level_to_ron(&default_level()).unwrap();
        let loaded = parse_level_data(text.as_bytes()).unwrap();
        assert_eq!(loaded.props.len(), 4);
        assert_eq!(loaded.rooms[1].name, "Hallway");
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut level = default_level();
        level.tables[0].radius = -1.0;
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));

        let mut level = default_level();
        level.spawn = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));

        let mut level = default_level();
        level.camera_settings.follow_blend = 0.0;
        assert!(matches!(validate_level(&level), Err(LevelError::Validation(_))));
    }

    #[test]
    fn test_garbage_fails_to_parse() {
        assert!(parse_level_data(b"(not a level").is_err());
        assert!(parse_level_data(&[0xff, 0x00, 0x13, 0x37]).is_err());
    }
}
