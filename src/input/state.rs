//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad once per frame and folds them into
//! an `InputSnapshot`, the only input the gameplay core reads.

use macroquad::prelude::*;
use super::{Action, Gamepad, button};

/// Stick deflection that counts as a digital press (same as the touch stick)
pub const STICK_THRESHOLD: f32 = 0.3;

/// One frame of player intent. Read by the core, never mutated by it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Edge-triggered: true only on the frame interact was pressed
    pub interact: bool,
}

impl InputSnapshot {
    /// Digital directions from an analog stick where up is negative Y
    pub fn from_stick(x: f32, y: f32) -> Self {
        Self {
            forward: y < -STICK_THRESHOLD,
            backward: y > STICK_THRESHOLD,
            turn_left: x < -STICK_THRESHOLD,
            turn_right: x > STICK_THRESHOLD,
            interact: false,
        }
    }

    /// Any forward/backward input held
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward
    }

    /// Combine two sources; a direction is held if either holds it
    pub fn merge(self, other: InputSnapshot) -> Self {
        Self {
            forward: self.forward || other.forward,
            backward: self.backward || other.backward,
            turn_left: self.turn_left || other.turn_left,
            turn_right: self.turn_right || other.turn_right,
            interact: self.interact || other.interact,
        }
    }
}

/// Unified input state that handles both keyboard and gamepad
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
        }
    }

    /// Call once per frame before reading input
    pub fn poll(&mut self) {
        self.gamepad.poll();
    }

    /// Build this frame's snapshot
    pub fn snapshot(&self) -> InputSnapshot {
        let keys = InputSnapshot {
            forward: self.action_down(Action::MoveForward),
            backward: self.action_down(Action::MoveBackward),
            turn_left: self.action_down(Action::TurnLeft),
            turn_right: self.action_down(Action::TurnRight),
            interact: self.action_pressed(Action::Interact),
        };
        let stick = self.gamepad.left_stick();
        keys.merge(InputSnapshot::from_stick(stick.x, stick.y))
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveForward => is_key_down(KeyCode::W) || is_key_down(KeyCode::Up),
            Action::MoveBackward => is_key_down(KeyCode::S) || is_key_down(KeyCode::Down),
            Action::TurnLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
            Action::TurnRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
            Action::Interact => is_key_down(KeyCode::E),
            Action::Confirm => is_key_down(KeyCode::Enter),
            Action::Dismiss => is_key_down(KeyCode::Escape),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        match action {
            Action::MoveForward => self.gamepad.is_button_down(button::DPAD_UP),
            Action::MoveBackward => self.gamepad.is_button_down(button::DPAD_DOWN),
            Action::TurnLeft => self.gamepad.is_button_down(button::DPAD_LEFT),
            Action::TurnRight => self.gamepad.is_button_down(button::DPAD_RIGHT),
            Action::Interact => self.gamepad.is_button_down(button::Y),
            Action::Confirm => self.gamepad.is_button_down(button::A),
            Action::Dismiss => self.gamepad.is_button_down(button::B),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::Interact => is_key_pressed(KeyCode::E),
            Action::Confirm => is_key_pressed(KeyCode::Enter),
            Action::Dismiss => is_key_pressed(KeyCode::Escape),
            _ => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        match action {
            Action::Interact => self.gamepad.is_button_pressed(button::Y),
            Action::Confirm => self.gamepad.is_button_pressed(button::A),
            Action::Dismiss => self.gamepad.is_button_pressed(button::B),
            _ => false,
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stick_threshold() {
        assert_eq!(InputSnapshot::from_stick(0.2, -0.2), InputSnapshot::default());

        let up_left = InputSnapshot::from_stick(-0.5, -0.9);
        assert!(up_left.forward && up_left.turn_left);
        assert!(!up_left.backward && !up_left.turn_right);
        assert!(!up_left.interact);

        let down = InputSnapshot::from_stick(0.0, 0.31);
        assert!(down.backward && down.is_moving());
    }

    #[test]
    fn test_merge() {
        let keys = InputSnapshot { interact: true, ..Default::default() };
        let stick = InputSnapshot { forward: true, ..Default::default() };
        let merged = keys.merge(stick);
        assert!(merged.forward && merged.interact);
        assert!(!merged.turn_left);
    }
}
