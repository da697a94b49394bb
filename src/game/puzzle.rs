//! Puzzle Chain
//!
//! The four interactables form a strict chain:
//! chest (magnifying glass) → note (code) → safe (key) → heart.
//!
//! Behavior is data, not closures: each `PuzzleKind` maps to a pure
//! `unlock` function over an explicit `GameProgress`, so every step can be
//! exercised without a registry or a world.

use serde::{Serialize, Deserialize};

/// Which link of the chain an interactable is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PuzzleKind {
    /// Holds the magnifying glass
    Chest,
    /// Unreadable until the glass is found; reveals the safe code
    Note,
    /// Opens with the code; holds the key
    Safe,
    /// The final object; opens with the key
    Heart,
}

impl PuzzleKind {
    /// Every kind a playable world must register, in chain order
    pub const CHAIN: [PuzzleKind; 4] = [
        PuzzleKind::Chest,
        PuzzleKind::Note,
        PuzzleKind::Safe,
        PuzzleKind::Heart,
    ];

    pub fn category(self) -> Category {
        match self {
            PuzzleKind::Heart => Category::Final,
            _ => Category::Riddle,
        }
    }

    /// Display name used when a level doesn't provide one
    pub fn default_name(self) -> &'static str {
        match self {
            PuzzleKind::Chest => "Small Chest",
            PuzzleKind::Note => "Paper",
            PuzzleKind::Safe => "Safe",
            PuzzleKind::Heart => "Heart",
        }
    }
}

/// Riddle items show a popup; final items end the game and idle-animate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Riddle,
    Final,
}

/// One-way progress latches. Once set, a flag is never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameProgress {
    has_item: bool,
    knows_code: bool,
    has_key: bool,
}

impl GameProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_item(&self) -> bool {
        self.has_item
    }

    pub fn knows_code(&self) -> bool {
        self.knows_code
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    /// Every prerequisite of the final object is satisfied
    pub fn is_chain_complete(&self) -> bool {
        self.has_item && self.knows_code && self.has_key
    }

    // Latches are private so nothing outside `unlock` can set them
    fn latch_item(&mut self) {
        self.has_item = true;
    }

    fn latch_code(&mut self) {
        self.knows_code = true;
    }

    fn latch_key(&mut self) {
        self.has_key = true;
    }
}

pub mod messages {
    pub const EMPTY: &str = "Empty.";
    pub const FOUND_GLASS: &str = "You found a magnifying glass!";
    pub const TOO_SMALL: &str = "Too small to read.";
    pub const CODE: &str = "Code: 1 4 3";
    pub const NEEDS_CODE: &str = "Locked. Needs a code.";
    pub const FOUND_KEY: &str = "Code accepted. You found a key!";
    pub const NEEDS_KEY: &str = "Locked. Needs a key.";
}

/// What triggering an interactable produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Text for the clue popup
    Message(&'static str),
    /// The final object opened. Presentation shows the ending instead of a popup.
    Unlocked,
}

impl UnlockOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            UnlockOutcome::Message(text) => Some(text),
            UnlockOutcome::Unlocked => None,
        }
    }
}

/// Run one kind's unlock logic against the progress flags.
///
/// Shape for every kind: already satisfied → "empty"/repeat message with no
/// mutation; prerequisite missing → hint; otherwise latch and report success.
pub fn unlock(kind: PuzzleKind, progress: &mut GameProgress) -> UnlockOutcome {
    match kind {
        PuzzleKind::Chest => {
            if progress.has_item {
                return UnlockOutcome::Message(messages::EMPTY);
            }
            progress.latch_item();
            UnlockOutcome::Message(messages::FOUND_GLASS)
        }
        PuzzleKind::Note => {
            if !progress.has_item {
                return UnlockOutcome::Message(messages::TOO_SMALL);
            }
            if !progress.knows_code {
                progress.latch_code();
            }
            UnlockOutcome::Message(messages::CODE)
        }
        PuzzleKind::Safe => {
            if progress.has_key {
                return UnlockOutcome::Message(messages::EMPTY);
            }
            if !progress.knows_code {
                return UnlockOutcome::Message(messages::NEEDS_CODE);
            }
            progress.latch_key();
            UnlockOutcome::Message(messages::FOUND_KEY)
        }
        PuzzleKind::Heart => {
            if progress.is_chain_complete() {
                UnlockOutcome::Unlocked
            } else {
                UnlockOutcome::Message(messages::NEEDS_KEY)
            }
        }
    }
}
