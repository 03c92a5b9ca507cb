//! Arrow-key state, folded from the raw key events the host page forwards.

use boxtruck_engine::InputEvent;

pub const KEY_LEFT: u32 = 37;
pub const KEY_RIGHT: u32 = 39;

/// Which steering keys are currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Fold one key event into the held state. Other keys are ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        let (key_code, down) = match *event {
            InputEvent::KeyDown { key_code } => (key_code, true),
            InputEvent::KeyUp { key_code } => (key_code, false),
        };
        match key_code {
            KEY_LEFT => self.left = down,
            KEY_RIGHT => self.right = down,
            _ => {}
        }
    }
}
