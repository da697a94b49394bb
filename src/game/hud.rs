//! HUD overlays: interaction prompt, clue popup and the ending screen
//!
//! State changes are plain methods so they can be driven from tests;
//! `draw` and `handle_input` are the only parts that touch macroquad.

use macroquad::prelude::*;
use crate::input::{Action, InputState};
use super::event::InteractionEvent;
use super::puzzle::UnlockOutcome;

/// How much the "Yes" button grows each time "No" is chosen
pub const YES_GROWTH: f32 = 0.5;

const PANEL_BG: Color = Color::new(0.05, 0.05, 0.08, 0.85);
const PANEL_BORDER: Color = Color::new(1.0, 0.4, 0.6, 1.0);
const TEXT_SIZE: f32 = 28.0;

/// A clue shown after examining something
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

/// The question asked once the final lock opens
#[derive(Debug, Clone, PartialEq)]
pub struct EndingScreen {
    pub yes_scale: f32,
    /// Where the "No" button sits, as fractions of the screen
    pub no_anchor: (f32, f32),
    pub accepted: bool,
}

impl EndingScreen {
    pub fn new() -> Self {
        Self {
            yes_scale: 1.0,
            no_anchor: (0.6, 0.6),
            accepted: false,
        }
    }

    /// "No" makes "Yes" bigger and sends "No" somewhere else
    pub fn decline(&mut self, next_anchor: (f32, f32)) {
        if self.accepted {
            return;
        }
        self.yes_scale += YES_GROWTH;
        self.no_anchor = next_anchor;
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }

    pub fn yes_label(&self) -> String {
        format!("YES! {}", "<3 ".repeat(self.yes_scale.floor() as usize).trim_end())
    }
}

impl Default for EndingScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hud {
    popup: Option<Popup>,
    ending: Option<EndingScreen>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn ending(&self) -> Option<&EndingScreen> {
        self.ending.as_ref()
    }

    /// While a popup or the ending is up, the interact button belongs to the HUD
    pub fn captures_input(&self) -> bool {
        self.popup.is_some() || self.ending.is_some()
    }

    /// Feed one interaction event from the session
    pub fn on_interaction(&mut self, event: &InteractionEvent) {
        match event.outcome {
            UnlockOutcome::Message(message) => {
                self.popup = Some(Popup {
                    title: event.name.clone(),
                    message: message.to_string(),
                });
            }
            UnlockOutcome::Unlocked => {
                self.popup = None;
                if self.ending.is_none() {
                    self.ending = Some(EndingScreen::new());
                }
            }
        }
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    /// Handle HUD buttons and keys for this frame
    pub fn handle_input(&mut self, input: &InputState) {
        if self.popup.is_some()
            && (input.action_pressed(Action::Dismiss)
                || input.action_pressed(Action::Interact)
                || input.action_pressed(Action::Confirm))
        {
            self.dismiss_popup();
            return;
        }

        let Some(ending) = self.ending.as_mut() else {
            return;
        };
        if ending.accepted {
            return;
        }

        let (yes, no) = ending_buttons(ending);
        let mouse: Vec2 = mouse_position().into();
        let clicked = is_mouse_button_pressed(MouseButton::Left);

        if input.action_pressed(Action::Confirm) || (clicked && yes.contains(mouse)) {
            log::info!("ending accepted after {} refusals", ((ending.yes_scale - 1.0) / YES_GROWTH).round());
            ending.accept();
        } else if input.action_pressed(Action::Dismiss) || (clicked && no.contains(mouse)) {
            ending.decline((macroquad::rand::gen_range(0.1, 0.9), macroquad::rand::gen_range(0.1, 0.9)));
        }
    }

    /// Draw the prompt for the hovered item, then any overlay
    pub fn draw(&self, hover_name: Option<&str>, has_gamepad: bool) {
        if let Some(ending) = &self.ending {
            draw_ending(ending);
            return;
        }

        if let Some(popup) = &self.popup {
            draw_popup(popup);
        } else if let Some(name) = hover_name {
            let key = if has_gamepad { "Y" } else { "E" };
            let text = format!("Press {}: {}", key, name);
            let dims = measure_text(&text, None, TEXT_SIZE as u16, 1.0);
            let x = (screen_width() - dims.width) / 2.0;
            let y = screen_height() * 0.8;
            draw_rectangle(x - 12.0, y - dims.height - 10.0, dims.width + 24.0, dims.height + 20.0, PANEL_BG);
            draw_text(&text, x, y, TEXT_SIZE, WHITE);
        }
    }
}

fn draw_panel(rect: Rect) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, PANEL_BG);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, PANEL_BORDER);
}

fn draw_centered(text: &str, y: f32, size: f32, color: Color) {
    let dims = measure_text(text, None, size as u16, 1.0);
    draw_text(text, (screen_width() - dims.width) / 2.0, y, size, color);
}

fn draw_popup(popup: &Popup) {
    let w = 420.0_f32.min(screen_width() - 40.0);
    let h = 160.0;
    let rect = Rect::new((screen_width() - w) / 2.0, (screen_height() - h) / 2.0, w, h);
    draw_panel(rect);
    draw_centered(&popup.title, rect.y + 40.0, TEXT_SIZE + 4.0, PANEL_BORDER);
    draw_centered(&popup.message, rect.y + 90.0, TEXT_SIZE, WHITE);
    draw_centered("[E / Esc]", rect.y + h - 16.0, 18.0, GRAY);
}

/// Screen rects of the Yes and No buttons
fn ending_buttons(ending: &EndingScreen) -> (Rect, Rect) {
    let (bw, bh) = (140.0, 50.0);
    let yes_w = bw * ending.yes_scale;
    let yes_h = bh * ending.yes_scale;
    let yes = Rect::new(
        screen_width() * 0.4 - yes_w / 2.0,
        screen_height() * 0.6 - yes_h / 2.0,
        yes_w,
        yes_h,
    );
    let no = Rect::new(
        screen_width() * ending.no_anchor.0 - bw / 2.0,
        screen_height() * ending.no_anchor.1 - bh / 2.0,
        bw,
        bh,
    );
    (yes, no)
}

fn draw_button(rect: Rect, label: &str, fill: Color, text_size: f32) {
    draw_rectangle(rect.x, rect.y, rect.w, rect.h, fill);
    draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, WHITE);
    let dims = measure_text(label, None, text_size as u16, 1.0);
    draw_text(
        label,
        rect.x + (rect.w - dims.width) / 2.0,
        rect.y + (rect.h + dims.height) / 2.0,
        text_size,
        WHITE,
    );
}

fn draw_ending(ending: &EndingScreen) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), Color::new(0.1, 0.0, 0.05, 0.9));

    if ending.accepted {
        draw_centered("<3  Yay!  <3", screen_height() * 0.45, 64.0, PANEL_BORDER);
        return;
    }

    draw_centered("The heart is open.", screen_height() * 0.3, 36.0, WHITE);
    draw_centered("Will you be my Valentine?", screen_height() * 0.4, 44.0, PANEL_BORDER);

    let (yes, no) = ending_buttons(ending);
    draw_button(no, "No", DARKGRAY, TEXT_SIZE);
    draw_button(yes, &ending.yes_label(), Color::new(0.85, 0.1, 0.3, 1.0), TEXT_SIZE * ending.yes_scale.min(3.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PuzzleKind;
    use crate::game::puzzle::messages;

    fn event(kind: PuzzleKind, outcome: UnlockOutcome) -> InteractionEvent {
        InteractionEvent {
            index: 0,
            kind,
            name: kind.default_name().to_string(),
            outcome,
        }
    }

    #[test]
    fn test_message_opens_popup() {
        let mut hud = Hud::new();
        assert!(!hud.captures_input());

        hud.on_interaction(&event(PuzzleKind::Note, UnlockOutcome::Message(messages::TOO_SMALL)));
        let popup = hud.popup().unwrap();
        assert_eq!(popup.title, "Paper");
        assert_eq!(popup.message, "Too small to read.");
        assert!(hud.captures_input());

        hud.dismiss_popup();
        assert!(hud.popup().is_none());
        assert!(!hud.captures_input());
    }

    #[test]
    fn test_unlock_opens_ending_once() {
        let mut hud = Hud::new();
        hud.on_interaction(&event(PuzzleKind::Safe, UnlockOutcome::Message(messages::FOUND_KEY)));
        hud.on_interaction(&event(PuzzleKind::Heart, UnlockOutcome::Unlocked));
        assert!(hud.popup().is_none());

        hud.ending.as_mut().unwrap().decline((0.2, 0.2));
        hud.on_interaction(&event(PuzzleKind::Heart, UnlockOutcome::Unlocked));
        assert_eq!(hud.ending().unwrap().yes_scale, 1.5);
    }

    #[test]
    fn test_no_grows_yes() {
        let mut ending = EndingScreen::new();
        assert_eq!(ending.yes_label(), "YES! <3");

        ending.decline((0.3, 0.7));
        ending.decline((0.8, 0.1));
        assert_eq!(ending.yes_scale, 2.0);
        assert_eq!(ending.no_anchor, (0.8, 0.1));
        assert_eq!(ending.yes_label(), "YES! <3 <3");

        ending.accept();
        ending.decline((0.5, 0.5));
        assert_eq!(ending.yes_scale, 2.0);
        assert!(ending.accepted);
    }
}
