//! Fan domain types.
//!
//! [`FanState`] is what the status register says the hardware is doing.
//! [`FanEntity`] is what the automation layer sees (on/off, speed,
//! oscillating) and what command diffs are computed against.
//! [`DesiredState`] is a partial request from the automation layer.

use serde::{Deserialize, Serialize};

/// Speed indicator resolved from the front-panel LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Speed {
    #[default]
    Off = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl Speed {
    /// Number of distinct running speeds.
    pub const LEVELS: u8 = 3;

    /// Position on the SPEED button cycle (0 when off).
    pub const fn level(self) -> u8 {
        self as u8
    }

    pub const fn from_level(level: u8) -> Option<Speed> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Oscillation {
    #[default]
    Off,
    On,
}

impl Oscillation {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Oscillation {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Off-timer setting shown by the timer LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimerSetting {
    #[default]
    Off,
    OneHour,
    ThreeHours,
    SixHours,
}

impl TimerSetting {
    /// Display label for the timer text entity.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "---",
            Self::OneHour => "1.0h",
            Self::ThreeHours => "3.0h",
            Self::SixHours => "6.0h",
        }
    }
}

/// Fully resolved hardware state from one status register read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FanState {
    pub speed: Speed,
    pub oscillation: Oscillation,
    pub timer: TimerSetting,
}

impl FanState {
    pub fn is_on(&self) -> bool {
        self.speed != Speed::Off
    }
}

/// The fan as published to the automation layer.
///
/// `speed` keeps the last running speed while the fan is off; the fan
/// resumes at that speed when switched back on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FanEntity {
    pub on: bool,
    pub speed: Speed,
    pub oscillating: bool,
}

/// Partial state requested by the automation layer; `None` leaves a field
/// as it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DesiredState {
    pub power: Option<bool>,
    pub speed: Option<Speed>,
    pub oscillating: Option<bool>,
}

impl DesiredState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn power(mut self, on: bool) -> Self {
        self.power = Some(on);
        self
    }

    /// Requested speed.  Only honoured together with `power(true)`.
    #[must_use]
    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    #[must_use]
    pub fn oscillating(mut self, on: bool) -> Self {
        self.oscillating = Some(on);
        self
    }
}

/// Capabilities advertised to the automation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanTraits {
    pub oscillation: bool,
    pub speed: bool,
    pub direction: bool,
    pub speed_count: u8,
}
