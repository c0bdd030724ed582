//! Status register decoding.
//!
//! The receiver module's front panel is wired to a 16-bit I/O expander.
//! Every line is active-low, so both bytes are inverted before use:
//!
//! ```text
//!  byte 0:  b7  b6  b5  b4  b3  b2  b1  b0
//!           1h  3h  6h  LOW MED HIGH btn btn
//!  byte 1:  b7 (→ bit 15) = SWING, rest unused
//! ```
//!
//! Bits 0 and 1 of byte 0 are buttons, not indicators, and are masked off.

use crate::fan::{FanState, Oscillation, Speed, TimerSetting};

/// Indicator LEDs and their bit position in the combined 16-bit word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Led {
    High = 2,
    Medium = 3,
    Low = 4,
    Timer6h = 5,
    Timer3h = 6,
    Timer1h = 7,
    Oscillate = 15,
}

impl Led {
    pub const fn mask(self) -> u16 {
        1 << self as u8
    }
}

const INDICATOR_MASK: u8 = 0xFC;
const SWING_MASK: u8 = 0x80;

/// Inverted, masked indicator word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedStatus(u16);

impl LedStatus {
    /// Build from the two raw bytes as read from the bus.
    pub fn from_raw(raw: [u8; 2]) -> Self {
        let low = u16::from(!raw[0] & INDICATOR_MASK);
        let swing = u16::from(!raw[1] & SWING_MASK) << 8;
        Self(low | swing)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_lit(self, led: Led) -> bool {
        self.0 & led.mask() != 0
    }

    /// Speed indicators are mutually exclusive on the hardware; if several
    /// are lit anyway, LOW wins over MEDIUM, which wins over HIGH.
    pub fn speed(self) -> Speed {
        let mut speed = Speed::Off;
        if self.is_lit(Led::High) {
            speed = Speed::High;
        }
        if self.is_lit(Led::Medium) {
            speed = Speed::Medium;
        }
        if self.is_lit(Led::Low) {
            speed = Speed::Low;
        }
        speed
    }

    /// Same precedence scheme: 1h over 3h over 6h.
    pub fn timer(self) -> TimerSetting {
        let mut timer = TimerSetting::Off;
        if self.is_lit(Led::Timer6h) {
            timer = TimerSetting::SixHours;
        }
        if self.is_lit(Led::Timer3h) {
            timer = TimerSetting::ThreeHours;
        }
        if self.is_lit(Led::Timer1h) {
            timer = TimerSetting::OneHour;
        }
        timer
    }

    pub fn oscillation(self) -> Oscillation {
        Oscillation::from(self.is_lit(Led::Oscillate))
    }

    pub fn to_state(self) -> FanState {
        FanState {
            speed: self.speed(),
            oscillation: self.oscillation(),
            timer: self.timer(),
        }
    }
}

/// Decode a raw status register snapshot into a fully resolved state.
pub fn decode_status(raw: [u8; 2]) -> FanState {
    LedStatus::from_raw(raw).to_state()
}
