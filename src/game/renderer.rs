//! Scene Renderer
//!
//! Draws the level, props and avatar with macroquad's 3D immediate mode,
//! from the camera pose produced by the session tick. Nothing here feeds
//! back into the simulation.

use macroquad::prelude as mq;
use macroquad::prelude::{Color, BLACK, WHITE};
use crate::math::Vec3;
use crate::world::{Level, RoomDef, TableDef, WALL_HEIGHT, TABLE_HEIGHT};
use super::camera::CameraPose;
use super::controller::PlayerState;
use super::interaction::{Interactable, InteractionRegistry};
use super::puzzle::PuzzleKind;

const WALL_COLOR: Color = Color::new(0.55, 0.5, 0.47, 1.0);
const TABLE_COLOR: Color = Color::new(0.4, 0.26, 0.15, 1.0);
const FUR_COLOR: Color = Color::new(0.95, 0.6, 0.25, 1.0);
const SKY_COLOR: Color = Color::new(0.04, 0.03, 0.06, 1.0);

fn to_mq(v: Vec3) -> mq::Vec3 {
    mq::vec3(v.x, v.y, v.z)
}

/// Scale a color's RGB, keeping alpha
fn shade(color: Color, factor: f32) -> Color {
    Color::new(
        (color.r * factor).min(1.0),
        (color.g * factor).min(1.0),
        (color.b * factor).min(1.0),
        color.a,
    )
}

/// Brighten toward white by `amount` (0..1)
fn glow(color: Color, amount: f32) -> Color {
    let a = amount.clamp(0.0, 1.0);
    Color::new(
        color.r + (1.0 - color.r) * a,
        color.g + (1.0 - color.g) * a,
        color.b + (1.0 - color.b) * a,
        color.a,
    )
}

/// Draw one frame of the 3D scene. Leaves the default 2D camera active.
pub fn draw_scene(level: &Level, registry: &InteractionRegistry, player: &PlayerState, pose: &CameraPose) {
    mq::clear_background(SKY_COLOR);
    mq::set_camera(&mq::Camera3D {
        position: to_mq(pose.position),
        target: to_mq(pose.target),
        up: mq::vec3(0.0, 1.0, 0.0),
        ..Default::default()
    });

    for room in &level.rooms {
        draw_room(room);
    }
    for wall in &level.walls {
        let bounds = wall.bounds();
        mq::draw_cube(to_mq(bounds.center()), to_mq(bounds.size()), None, WALL_COLOR);
        mq::draw_cube_wires(to_mq(bounds.center()), to_mq(bounds.size()), shade(WALL_COLOR, 0.6));
    }
    for table in &level.tables {
        draw_table(table);
    }
    for (index, item) in registry.items().iter().enumerate() {
        let pulse = match registry.hover() {
            Some(hover) if hover.index == index => hover.pulse,
            _ => 0.0,
        };
        draw_prop(item, pulse);
    }
    draw_avatar(player);

    mq::set_default_camera();
}

fn draw_room(room: &RoomDef) {
    let tint = Color::from_rgba(room.color[0], room.color[1], room.color[2], 255);
    let center = mq::vec3(room.center_x, 0.0, room.center_z);
    let half = mq::vec2(room.width / 2.0, room.depth / 2.0);

    mq::draw_plane(center, half, None, shade(tint, 0.25));
    mq::draw_cube(
        mq::vec3(room.center_x, WALL_HEIGHT, room.center_z),
        mq::vec3(room.width, 0.2, room.depth),
        None,
        shade(tint, 0.12),
    );
    for bounds in room.side_walls() {
        mq::draw_cube(to_mq(bounds.center()), to_mq(bounds.size()), None, shade(glow(WALL_COLOR, 0.1), 0.9));
        mq::draw_cube_wires(to_mq(bounds.center()), to_mq(bounds.size()), shade(tint, 0.5));
    }
}

fn draw_table(table: &TableDef) {
    let top = table.top_bounds();
    mq::draw_cylinder(
        to_mq(top.center()),
        table.radius,
        table.radius,
        top.size().y,
        None,
        TABLE_COLOR,
    );
    mq::draw_cube(
        mq::vec3(table.x, TABLE_HEIGHT / 2.0, table.z),
        mq::vec3(0.3, TABLE_HEIGHT, 0.3),
        None,
        shade(TABLE_COLOR, 0.7),
    );
}

fn draw_prop(item: &Interactable, pulse: f32) {
    let anchor = item.anchor;
    match item.kind {
        PuzzleKind::Chest => {
            let color = glow(Color::new(0.55, 0.33, 0.12, 1.0), pulse);
            mq::draw_cube(to_mq(anchor), mq::vec3(1.5, 1.0, 1.0), None, color);
            mq::draw_cube_wires(to_mq(anchor), mq::vec3(1.5, 1.0, 1.0), shade(color, 0.5));
        }
        PuzzleKind::Note => {
            let color = glow(Color::new(0.9, 0.88, 0.8, 1.0), pulse);
            mq::draw_cube(to_mq(anchor), mq::vec3(0.6, 0.02, 0.8), None, color);
        }
        PuzzleKind::Safe => {
            let color = glow(Color::new(0.35, 0.37, 0.4, 1.0), pulse);
            mq::draw_cube(to_mq(anchor), mq::vec3(1.6, 1.6, 1.6), None, color);
            let dial = anchor + Vec3::new(0.0, 0.0, 0.85);
            mq::draw_sphere(to_mq(dial), 0.2, None, shade(color, 1.4));
        }
        PuzzleKind::Heart => {
            let color = glow(Color::new(0.9, 0.05, 0.15, 1.0), pulse);
            let center = Vec3::new(anchor.x, item.idle.height, anchor.z);
            // Two lobes over a point, turned by the idle spin
            let side = Vec3::new(0.35, 0.0, 0.0).rotate_y(item.idle.spin);
            mq::draw_sphere(to_mq(center + side + Vec3::new(0.0, 0.2, 0.0)), 0.45, None, color);
            mq::draw_sphere(to_mq(center - side + Vec3::new(0.0, 0.2, 0.0)), 0.45, None, color);
            mq::draw_sphere(to_mq(center - Vec3::new(0.0, 0.35, 0.0)), 0.3, None, color);
        }
    }
}

fn draw_avatar(player: &PlayerState) {
    let feet = player.position;
    let forward = player.forward();

    mq::draw_sphere(to_mq(feet + Vec3::new(0.0, 0.9, 0.0)), 0.8, None, FUR_COLOR);
    let head = feet + Vec3::new(0.0, 1.9, 0.0) + forward.scale(0.7);
    mq::draw_sphere(to_mq(head), 0.55, None, FUR_COLOR);

    let ear = Vec3::new(0.3, 0.0, 0.0).rotate_y(player.yaw);
    for side in [ear, -ear] {
        mq::draw_cube(to_mq(head + side + Vec3::new(0.0, 0.5, 0.0)), mq::vec3(0.2, 0.35, 0.2), None, shade(FUR_COLOR, 0.8));
    }
    let nose = head + forward.scale(0.55);
    mq::draw_sphere(to_mq(nose), 0.08, None, BLACK);

    let tail = feet + Vec3::new(0.0, 1.2, 0.0) - forward.scale(1.0);
    mq::draw_line_3d(to_mq(feet + Vec3::new(0.0, 0.9, 0.0) - forward.scale(0.7)), to_mq(tail), WHITE);
}
