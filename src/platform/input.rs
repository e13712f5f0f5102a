//! Key events to per-tick input
//!
//! Hosts report raw key down/up events; auto-repeat downs arrive while the
//! key is already held and are dropped here. Jump and dash fire once per
//! press, movement follows the held keys.

use crate::sim::TickInput;

/// Logical game actions a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(GameAction),
    Released(GameAction),
    Quit,
}

/// Held-key state carried between frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    left: bool,
    right: bool,
    jump: bool,
    dash: bool,
}

impl InputState {
    fn held_mut(&mut self, action: GameAction) -> &mut bool {
        match action {
            GameAction::MoveLeft => &mut self.left,
            GameAction::MoveRight => &mut self.right,
            GameAction::Jump => &mut self.jump,
            GameAction::Dash => &mut self.dash,
        }
    }

    pub fn is_held(&self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.left,
            GameAction::MoveRight => self.right,
            GameAction::Jump => self.jump,
            GameAction::Dash => self.dash,
        }
    }

    /// Horizontal axis from held keys: right minus left
    pub fn axis(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// Fold one frame's events into the held state and build the tick input
    pub fn frame_input(&mut self, events: &[InputEvent]) -> TickInput {
        let mut input = TickInput::default();
        for event in events {
            match *event {
                InputEvent::Pressed(action) => {
                    let held = self.held_mut(action);
                    let edge = !*held;
                    *held = true;
                    if edge {
                        match action {
                            GameAction::Jump => input.jump = true,
                            GameAction::Dash => input.dash = true,
                            GameAction::MoveLeft | GameAction::MoveRight => {}
                        }
                    }
                }
                InputEvent::Released(action) => *self.held_mut(action) = false,
                InputEvent::Quit => input.quit = true,
            }
        }
        input.movement = self.axis();
        input
    }
}
