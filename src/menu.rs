//! A cursor over a list of options, driven by edge-triggered input.

use crate::input::{InputAction, InputSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// Moving the cursor.
    #[default]
    Idle,
    /// The option under the cursor was chosen.
    Confirm,
    /// The menu was backed out of.
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuControl {
    pub state: ControlState,
    pub index: usize,
    pub len: usize,
}

impl MenuControl {
    pub fn new(len: usize) -> Self {
        Self {
            state: ControlState::Idle,
            index: 0,
            len,
        }
    }

    /// Back to idle, keeping the cursor where it was.
    pub fn resume(&mut self) {
        self.state = ControlState::Idle;
    }

    /// Applies one frame of input while idle. Confirming an empty menu does
    /// nothing; cancelling always works.
    pub fn update(&mut self, input: &dyn InputSource) {
        if self.state != ControlState::Idle {
            return;
        }
        if input.just_pressed(InputAction::Cancel) {
            self.state = ControlState::Cancel;
        } else if input.just_pressed(InputAction::Confirm) {
            if self.len > 0 {
                self.state = ControlState::Confirm;
            }
        } else if input.just_pressed(InputAction::Up) || input.just_pressed(InputAction::Left) {
            self.index = self.index.saturating_sub(1);
        } else if (input.just_pressed(InputAction::Down) || input.just_pressed(InputAction::Right))
            && self.index + 1 < self.len
        {
            self.index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::FrameInput;

    #[test]
    fn test_cursor_is_clamped() {
        let mut menu = MenuControl::new(3);
        menu.update(&FrameInput::press(InputAction::Up));
        assert_eq!(menu.index, 0);
        for _ in 0..5 {
            menu.update(&FrameInput::press(InputAction::Down));
        }
        assert_eq!(menu.index, 2);
    }

    #[test]
    fn test_confirm_and_cancel() {
        let mut menu = MenuControl::new(2);
        menu.update(&FrameInput::press(InputAction::Confirm));
        assert_eq!(menu.state, ControlState::Confirm);
        // Further input is ignored until the menu is idle again.
        menu.update(&FrameInput::press(InputAction::Down));
        assert_eq!(menu.index, 0);

        menu.resume();
        menu.update(&FrameInput::press(InputAction::Cancel));
        assert_eq!(menu.state, ControlState::Cancel);
    }

    #[test]
    fn test_empty_menu_cannot_be_confirmed() {
        let mut menu = MenuControl::new(0);
        menu.update(&FrameInput::press(InputAction::Confirm));
        assert_eq!(menu.state, ControlState::Idle);
    }
}
