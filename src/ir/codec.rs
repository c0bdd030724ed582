//! Mark/space pulse codec for the fan's IR protocol.
//!
//! Frame format (all durations in microseconds):
//! ```text
//! ┌──────────────┬───────────────────────────────┬──────────────────┐
//! │ Header       │ Data bits, LSB first per byte │ Terminator       │
//! │ 3650 / 3440  │ 900/2615 = 1, 900/850 = 0     │ 900 / 10000      │
//! └──────────────┴───────────────────────────────┴──────────────────┘
//! ```
//!
//! The encoder always emits a single continuous frame.  Receivers may see
//! the same payload split into several frames, each closed by a terminator
//! and reopened by a fresh header; the decoder accepts that and carries on
//! with the same bit position.

use crate::error::DecodeError;

pub const BIT_MARK_US: u32 = 900;
pub const ONE_SPACE_US: u32 = 2615;
pub const ZERO_SPACE_US: u32 = 850;
pub const HEADER_MARK_US: u32 = 3650;
pub const HEADER_SPACE_US: u32 = 3440;
pub const FRAME_END_US: u32 = 10_000;

/// Receive tolerance applied to every measured duration (±%).
pub const TOLERANCE_PERCENT: u32 = 25;

/// One mark (carrier on) followed by one space (carrier off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub mark_us: u32,
    pub space_us: u32,
}

impl Pulse {
    pub const HEADER: Pulse = Pulse::new(HEADER_MARK_US, HEADER_SPACE_US);
    pub const ONE: Pulse = Pulse::new(BIT_MARK_US, ONE_SPACE_US);
    pub const ZERO: Pulse = Pulse::new(BIT_MARK_US, ZERO_SPACE_US);
    pub const FRAME_END: Pulse = Pulse::new(BIT_MARK_US, FRAME_END_US);

    pub const fn new(mark_us: u32, space_us: u32) -> Self {
        Self { mark_us, space_us }
    }

    /// Whether this measured pair falls inside the tolerance window of `expected`.
    pub fn matches(self, expected: Pulse) -> bool {
        within_tolerance(self.mark_us, expected.mark_us)
            && within_tolerance(self.space_us, expected.space_us)
    }
}

fn within_tolerance(actual: u32, expected: u32) -> bool {
    let lower = expected * (100 - TOLERANCE_PERCENT) / 100;
    let upper = expected * (100 + TOLERANCE_PERCENT) / 100;
    (lower..=upper).contains(&actual)
}

/// Ordered mark/space pairs making up one transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PulseTrain {
    pulses: Vec<Pulse>,
}

impl PulseTrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(pairs: usize) -> Self {
        Self {
            pulses: Vec::with_capacity(pairs),
        }
    }

    pub fn push(&mut self, pulse: Pulse) {
        self.pulses.push(pulse);
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    /// Number of mark/space pairs.
    pub fn len(&self) -> usize {
        self.pulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pulses.is_empty()
    }

    /// Total on-air time of the train.
    pub fn duration_us(&self) -> u64 {
        self.pulses
            .iter()
            .map(|p| u64::from(p.mark_us) + u64::from(p.space_us))
            .sum()
    }
}

impl AsRef<[Pulse]> for PulseTrain {
    fn as_ref(&self) -> &[Pulse] {
        &self.pulses
    }
}

impl From<Vec<Pulse>> for PulseTrain {
    fn from(pulses: Vec<Pulse>) -> Self {
        Self { pulses }
    }
}

impl FromIterator<Pulse> for PulseTrain {
    fn from_iter<I: IntoIterator<Item = Pulse>>(iter: I) -> Self {
        Self {
            pulses: iter.into_iter().collect(),
        }
    }
}

/// Encode `bytes` into one frame: header, 8 pairs per byte (LSB first),
/// terminator.
pub fn encode(bytes: &[u8]) -> PulseTrain {
    let mut train = PulseTrain::with_capacity(bytes.len() * 8 + 2);
    train.push(Pulse::HEADER);
    for &byte in bytes {
        for bit in 0..8 {
            let pulse = if byte & (1 << bit) != 0 {
                Pulse::ONE
            } else {
                Pulse::ZERO
            };
            train.push(pulse);
        }
    }
    train.push(Pulse::FRAME_END);
    train
}

/// Read position over a received train; only advances on a match.
struct Cursor<'a> {
    pulses: &'a [Pulse],
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(pulses: &'a [Pulse]) -> Self {
        Self { pulses, index: 0 }
    }

    fn expect(&mut self, expected: Pulse) -> bool {
        match self.pulses.get(self.index) {
            Some(pulse) if pulse.matches(expected) => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    fn remaining(&self) -> usize {
        self.pulses.len().saturating_sub(self.index)
    }
}

/// Decode a received train back into payload bytes.
///
/// Stops once only the trailing terminator is left.  A mid-stream
/// terminator must be followed by a header, after which the current bit
/// position continues.
pub fn decode(train: impl AsRef<[Pulse]>) -> Result<Vec<u8>, DecodeError> {
    let mut cursor = Cursor::new(train.as_ref());

    if !cursor.expect(Pulse::HEADER) {
        return Err(DecodeError::InvalidHeader { at: 0 });
    }

    let mut bytes = Vec::new();
    while cursor.remaining() > 1 {
        let mut byte = 0u8;
        for bit in 0..8u8 {
            if cursor.expect(Pulse::FRAME_END) && !cursor.expect(Pulse::HEADER) {
                return Err(DecodeError::InvalidHeader { at: cursor.index });
            }

            if cursor.expect(Pulse::ONE) {
                byte |= 1 << bit;
            } else if !cursor.expect(Pulse::ZERO) {
                return Err(DecodeError::InvalidBit {
                    byte: bytes.len(),
                    bit,
                    at: cursor.index,
                });
            }
        }
        bytes.push(byte);
    }

    Ok(bytes)
}
