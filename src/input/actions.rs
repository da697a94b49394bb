//! Game action definitions

/// All possible game actions that can be triggered by input
///
/// Button mappings (Xbox/PlayStation):
/// - Left stick / D-pad = Move and turn
/// - Y/Triangle = Interact
/// - A/Cross = Confirm
/// - B/Circle = Dismiss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (W/S or stick up/down)
    MoveForward,
    MoveBackward,

    // Turning (A/D or stick left/right)
    TurnLeft,
    TurnRight,

    // Face buttons
    Interact,       // Y - examine, open
    Confirm,        // A - answer "yes" on the ending screen
    Dismiss,        // B - close the clue popup
}
