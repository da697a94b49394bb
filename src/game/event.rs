//! Event System
//!
//! The gameplay core never plays sounds or opens popups itself. It sends
//! events that the presentation layer drains once per frame:
//! 1. Controller detects a step → sends FootstepEvent → audio plays a tap
//! 2. Registry runs an unlock → sends InteractionEvent → HUD shows a clue
//!    popup, or the ending when the outcome is `Unlocked`
//! 3. Controller reverts a move → sends WallHitEvent → debug overlay/logging

use crate::math::Vec3;
use super::puzzle::{PuzzleKind, UnlockOutcome};

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    /// Check if there are any events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events in queue
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
#[derive(Debug, Default)]
pub struct Events {
    /// Player took a step
    pub footstep: EventQueue<FootstepEvent>,

    /// An interactable was triggered
    pub interaction: EventQueue<InteractionEvent>,

    /// A move was vetoed by a wall
    pub wall_hit: EventQueue<WallHitEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.footstep.clear();
        self.interaction.clear();
        self.wall_hit.clear();
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// The player took a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootstepEvent {
    pub position: Vec3,
}

/// An interactable's unlock logic ran
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    /// Index in the registry
    pub index: usize,
    pub kind: PuzzleKind,
    /// Display name (popup title)
    pub name: String,
    pub outcome: UnlockOutcome,
}

/// A proposed move overlapped a wall and was reverted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHitEvent {
    pub wall: usize,
    pub position: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.footstep.send(FootstepEvent { position: Vec3::ZERO });
        events.wall_hit.send(WallHitEvent { wall: 3, position: Vec3::ZERO });

        assert_eq!(events.footstep.len(), 1);
        assert_eq!(events.wall_hit.iter().next().map(|e| e.wall), Some(3));

        events.clear_all();
        assert!(events.footstep.is_empty());
        assert!(events.wall_hit.is_empty());
    }
}
