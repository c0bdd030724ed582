//! Polled, debounced push button for the on-board "Set Timer" key.
//!
//! ## Hardware
//!
//! Active-low momentary switch with the internal pull-up enabled.  The
//! main loop samples the level every pass and feeds it to
//! [`ButtonDriver::tick`], which runs the debounce state machine.
//!
//! | State        | Leaves when                          | Event   |
//! |--------------|--------------------------------------|---------|
//! | Idle         | level goes low                       |         |
//! | DebounceWait | still low after `DEBOUNCE_MS`        | `Press` |
//! |              | back high first (bounce)             |         |
//! | Held         | level goes high                      |         |

const DEBOUNCE_MS: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Press,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Idle,
    DebounceWait { since_ms: u64 },
    /// Reported; waits for release so a held key fires once.
    Held,
}

pub struct ButtonDriver {
    gpio: i32,
    state: PressState,
}

impl ButtonDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            state: PressState::Idle,
        }
    }

    /// GPIO pin this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Feed one sample.  `pressed` is the logical level (already
    /// inverted for active-low wiring).
    pub fn tick(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        match self.state {
            PressState::Idle => {
                if pressed {
                    self.state = PressState::DebounceWait { since_ms: now_ms };
                }
                None
            }

            PressState::DebounceWait { since_ms } => {
                if !pressed {
                    self.state = PressState::Idle;
                    return None;
                }
                if now_ms.saturating_sub(since_ms) >= DEBOUNCE_MS {
                    self.state = PressState::Held;
                    return Some(ButtonEvent::Press);
                }
                None
            }

            PressState::Held => {
                if !pressed {
                    self.state = PressState::Idle;
                }
                None
            }
        }
    }
}
