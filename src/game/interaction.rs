//! Interaction Registry
//!
//! Owns the puzzle props and the progress flags. Two independent passes run
//! every tick:
//! - `animate_idle` spins and bobs every final-category prop
//! - `evaluate` finds the nearest prop in range, marks it as the hover
//!   target and, when interact was pressed, runs its unlock logic once

use crate::math::Vec3;
use crate::world::WorldError;
use super::event::{Events, InteractionEvent};
use super::puzzle::{self, Category, GameProgress, PuzzleKind, UnlockOutcome};

/// Final props spin at this rate (radians per second)
pub const SPIN_SPEED: f32 = 1.2;
/// Vertical bob amplitude around the anchor height
pub const BOB_AMPLITUDE: f32 = 0.5;
/// Bob angular frequency (radians per second)
pub const BOB_FREQUENCY: f32 = 3.0;
/// Hover pulse angular frequency (radians per second)
pub const PULSE_FREQUENCY: f32 = 10.0;

/// Cosmetic hover glow in [0.2, 0.4]
pub fn hover_pulse(elapsed: f32) -> f32 {
    0.2 + ((elapsed * PULSE_FREQUENCY).sin() * 0.1 + 0.1)
}

/// Render-side idle state of a final prop. Does not move the anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdleAnimation {
    /// Accumulated spin about the vertical axis
    pub spin: f32,
    /// Current display height
    pub height: f32,
}

/// A registered puzzle prop
#[derive(Debug, Clone, PartialEq)]
pub struct Interactable {
    pub kind: PuzzleKind,
    pub name: String,
    /// Fixed position used for proximity
    pub anchor: Vec3,
    pub idle: IdleAnimation,
}

impl Interactable {
    pub fn new(kind: PuzzleKind, name: impl Into<String>, anchor: Vec3) -> Self {
        Self {
            kind,
            name: name.into(),
            anchor,
            idle: IdleAnimation { spin: 0.0, height: anchor.y },
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }
}

/// The prop currently in range of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    pub index: usize,
    pub pulse: f32,
}

#[derive(Debug, Clone)]
pub struct InteractionRegistry {
    items: Vec<Interactable>,
    progress: GameProgress,
    radius: f32,
    hover: Option<HoverTarget>,
    elapsed: f32,
}

impl InteractionRegistry {
    /// Take ownership of the props and the progress they gate.
    ///
    /// Every link of the chain must be registered exactly once.
    pub fn new(items: Vec<Interactable>, progress: GameProgress, radius: f32) -> Result<Self, WorldError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(WorldError::InvalidRadius(radius));
        }
        if let Some(bad) = items.iter().find(|i| !i.anchor.is_finite()) {
            return Err(WorldError::MalformedProp { name: bad.name.clone() });
        }
        for kind in PuzzleKind::CHAIN {
            match items.iter().filter(|i| i.kind == kind).count() {
                0 => return Err(WorldError::MissingPuzzle(kind)),
                1 => {}
                _ => return Err(WorldError::DuplicatePuzzle(kind)),
            }
        }

        Ok(Self {
            items,
            progress,
            radius,
            hover: None,
            elapsed: 0.0,
        })
    }

    pub fn items(&self) -> &[Interactable] {
        &self.items
    }

    pub fn progress(&self) -> &GameProgress {
        &self.progress
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Seconds of idle animation so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Hover target from the last `evaluate`
    pub fn hover(&self) -> Option<HoverTarget> {
        self.hover
    }

    /// Display name of the hover target, for the prompt
    pub fn hover_name(&self) -> Option<&str> {
        self.hover.map(|h| self.items[h.index].name.as_str())
    }

    /// Whether the prop at `index` glows this tick
    pub fn is_glowing(&self, index: usize) -> bool {
        self.hover.is_some_and(|h| h.index == index)
    }

    /// Nearest prop strictly inside the radius. Ties keep the earliest
    /// registered prop.
    pub fn nearest(&self, player_position: Vec3) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (index, item) in self.items.iter().enumerate() {
            let dist = player_position.distance(item.anchor);
            if dist >= self.radius {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((index, dist));
            }
        }
        best
    }

    /// Idle pass: spin and bob every final prop, whatever the player does
    pub fn animate_idle(&mut self, delta_time: f32) {
        self.elapsed += delta_time;
        let bob = (self.elapsed * BOB_FREQUENCY).sin() * BOB_AMPLITUDE;
        for item in self.items.iter_mut().filter(|i| i.category() == Category::Final) {
            item.idle.spin += SPIN_SPEED * delta_time;
            item.idle.height = item.anchor.y + bob;
        }
    }

    /// Proximity pass. Returns true only when a prop was in range and its
    /// unlock ran; the outcome is sent as an `InteractionEvent`.
    pub fn evaluate(&mut self, player_position: Vec3, trigger_pressed: bool, events: &mut Events) -> bool {
        self.hover = None;

        let Some((index, _)) = self.nearest(player_position) else {
            return false;
        };
        self.hover = Some(HoverTarget { index, pulse: hover_pulse(self.elapsed) });

        if !trigger_pressed {
            return false;
        }

        let item = &self.items[index];
        let outcome = puzzle::unlock(item.kind, &mut self.progress);
        match outcome {
            UnlockOutcome::Message(text) => log::info!("{}: {}", item.name, text),
            UnlockOutcome::Unlocked => log::info!("{}: unlocked", item.name),
        }
        events.interaction.send(InteractionEvent {
            index,
            kind: item.kind,
            name: item.name.clone(),
            outcome,
        });
        true
    }
}
