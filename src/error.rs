//! Error types for the PanaFan firmware.
//!
//! Every variant is `Copy` so errors can be passed through the poll cycle and
//! event sink without allocation.  None of them is fatal: a failed decode is a
//! diagnostic, a failed bus read skips one poll cycle, and a bad config is
//! rejected before the control loop starts.

use core::fmt;

// ---------------------------------------------------------------------------
// Pulse decode errors
// ---------------------------------------------------------------------------

/// Failure while decoding a received pulse train.
///
/// `at` is the index of the mark/space pair that failed to match, counted
/// from the start of the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Expected a header pair (at the start, or after a mid-stream frame end).
    InvalidHeader { at: usize },
    /// A pair matched neither a one-bit nor a zero-bit.
    InvalidBit { byte: usize, bit: u8, at: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader { at } => write!(f, "expected header at pulse {at}"),
            Self::InvalidBit { byte, bit, at } => {
                write!(f, "invalid bit {bit} of byte {byte} at pulse {at}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

// ---------------------------------------------------------------------------
// Status bus errors
// ---------------------------------------------------------------------------

/// The status register read failed.  The poll cycle is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// The I/O expander did not acknowledge its address or data.
    Nack,
    /// Another master won arbitration.
    ArbitrationLoss,
    /// Bus-level fault (misplaced start/stop, stuck line).
    Bus,
    /// Any other driver error.
    Other,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nack => write!(f, "no acknowledge"),
            Self::ArbitrationLoss => write!(f, "arbitration lost"),
            Self::Bus => write!(f, "bus error"),
            Self::Other => write!(f, "I2C read error"),
        }
    }
}

impl std::error::Error for BusError {}

impl From<embedded_hal::i2c::ErrorKind> for BusError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Bus => Self::Bus,
            _ => Self::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A [`FanConfig`](crate::config::FanConfig) failed validation or parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Poll interval must be at least 1 ms.
    InvalidPollInterval,
    /// Not a 7-bit I²C address.
    InvalidAddress(u8),
    /// IR carrier frequency outside the supported range.
    InvalidCarrier,
    /// The serialized config could not be parsed.
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPollInterval => write!(f, "poll interval must be >= 1 ms"),
            Self::InvalidAddress(addr) => write!(f, "invalid I2C address 0x{addr:02X}"),
            Self::InvalidCarrier => write!(f, "IR carrier frequency out of range"),
            Self::Parse => write!(f, "config parse error"),
        }
    }
}

impl std::error::Error for ConfigError {}
