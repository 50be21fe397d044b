//! Edge-triggered input → per-tick intent
//!
//! Key-down/key-up events toggle held movement flags; presses of the other
//! actions are latched as one-shots until the next tick consumes them.

use crate::sim::TickInput;

/// Abstract input actions (device binding happens elsewhere)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Jump,
    /// Hold to ride a trapeze, release to let go
    Grab,
    SaveAndQuit,
    Load,
    Confirm,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(InputAction),
    Released(InputAction),
}

/// Commands for the outer session loop rather than the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    SaveAndQuit,
    Load,
    Confirm,
    Quit,
}

/// Accumulated input between two ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    move_left: bool,
    move_right: bool,
    jump: bool,
    grab: bool,
    release: bool,
    commands: Vec<SessionCommand>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(action) => match action {
                InputAction::MoveLeft => self.move_left = true,
                InputAction::MoveRight => self.move_right = true,
                InputAction::Jump => self.jump = true,
                InputAction::Grab => self.grab = true,
                InputAction::SaveAndQuit => self.commands.push(SessionCommand::SaveAndQuit),
                InputAction::Load => self.commands.push(SessionCommand::Load),
                InputAction::Confirm => self.commands.push(SessionCommand::Confirm),
                InputAction::Quit => self.commands.push(SessionCommand::Quit),
            },
            InputEvent::Released(action) => match action {
                InputAction::MoveLeft => self.move_left = false,
                InputAction::MoveRight => self.move_right = false,
                InputAction::Grab => self.release = true,
                _ => {}
            },
        }
    }

    /// Input for the next tick; clears one-shots, keeps held flags
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            jump: self.jump,
            grab: self.grab,
            release: self.release,
        };
        self.jump = false;
        self.grab = false;
        self.release = false;
        input
    }

    /// Session commands latched since the last call
    pub fn take_commands(&mut self) -> Vec<SessionCommand> {
        std::mem::take(&mut self.commands)
    }
}
