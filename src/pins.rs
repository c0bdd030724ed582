//! GPIO / peripheral pin assignments for the controller board.
//!
//! Single source of truth: the firmware entry point references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Front-panel status expander (I²C)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Standard-mode bus speed; the expander tops out at 400 kHz.
pub const I2C_BAUDRATE_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// IR LED (driven through a transistor, active HIGH)
// ---------------------------------------------------------------------------

pub const IR_TX_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// "Set Timer" key (momentary, active LOW, internal pull-up)
// ---------------------------------------------------------------------------

/// BOOT strapping key on most dev boards; only sampled after start-up.
pub const SET_TIMER_BUTTON_GPIO: i32 = 0;
