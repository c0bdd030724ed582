//! Remote-control button table.
//!
//! Payloads are fixed by the receiver's protocol and must be reproduced
//! byte-for-byte.

use super::codec::{PulseTrain, encode};

/// Size of every command payload in bytes.
pub const PAYLOAD_LEN: usize = 3;

/// One press of a remote-control button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// ON/OFF button.
    PowerToggle = 0,
    /// SPEED button (cycles LOW → MEDIUM → HIGH → LOW).
    SpeedStep = 1,
    /// SWING button.
    OscillateToggle = 2,
    /// TIMER button (cycles OFF → 1h → 3h → 6h → OFF).
    TimerCycle = 3,
}

const PAYLOADS: [[u8; PAYLOAD_LEN]; 4] = [
    [0x3B, 0x48, 0x7C], // ON/OFF
    [0xFB, 0x47, 0x80], // SPEED
    [0x7B, 0x47, 0x88], // SWING
    [0xBB, 0x47, 0x84], // TIMER
];

impl Command {
    pub const ALL: [Command; 4] = [
        Command::PowerToggle,
        Command::SpeedStep,
        Command::OscillateToggle,
        Command::TimerCycle,
    ];

    /// The 3-byte payload sent for this button.
    pub const fn payload(self) -> [u8; PAYLOAD_LEN] {
        PAYLOADS[self as usize]
    }

    /// Reverse lookup of a decoded payload.
    pub fn from_payload(bytes: &[u8]) -> Option<Command> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.payload().as_slice() == bytes)
    }

    /// Render this button press as a transmittable frame.
    pub fn to_pulses(self) -> PulseTrain {
        encode(&self.payload())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::PowerToggle => "POWER",
            Self::SpeedStep => "SPEED",
            Self::OscillateToggle => "OSCILLATE",
            Self::TimerCycle => "TIMER",
        }
    }
}
