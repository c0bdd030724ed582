//! Port traits: the boundary between the fan core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanService (domain)
//! ```
//!
//! The I²C expander, the IR LED and whatever consumes events implement
//! these traits.  [`FanService`](super::service::FanService) takes them
//! as generics at each call site, so the core never touches hardware.

use crate::error::BusError;
use crate::ir::PulseTrain;

use super::events::FanEvent;

// ───────────────────────────────────────────────────────────────
// Status bus port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read side: the front-panel status register.
pub trait StatusBusPort {
    /// Read the two raw register bytes, exactly as they come off the bus.
    fn read_status(&mut self) -> Result<[u8; 2], BusError>;
}

// ───────────────────────────────────────────────────────────────
// IR transmit port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write side: send one frame on the IR LED.
///
/// Returns once the frame is on the air (or queued for immediate
/// transmission).  Failures are the adapter's to report; the sequencer
/// has no retry path.
pub trait IrTransmitPort {
    fn transmit(&mut self, train: &PulseTrain);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / entities)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget consumer of [`FanEvent`]s.
pub trait EventSink {
    fn emit(&mut self, event: &FanEvent);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: &FanEvent) {
        (**self).emit(event);
    }
}

/// Fan out to two sinks, in order.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &FanEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic wall time.  Pacing delays are measured from this clock
/// after a blocking transmit returns, not from the logical deadline
/// that triggered the transmit.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

impl<T: ClockPort + ?Sized> ClockPort for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
