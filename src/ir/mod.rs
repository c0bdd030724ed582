//! Infrared link to the fan's remote-control receiver.
//!
//! ```text
//!  Command ──payload()──▶ [u8; 3] ──encode()──▶ PulseTrain ──▶ IrTransmitPort
//!                                   ◀──decode()──
//! ```
//!
//! The receiver understands four buttons, each a fixed 3-byte payload sent
//! as one continuous mark/space frame.

pub mod codec;
pub mod command;

pub use codec::{Pulse, PulseTrain, decode, encode};
pub use command::Command;
