//! Outbound fan events.
//!
//! The [`FanService`](super::service::FanService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Sinks decide what to do
//! with them: log a line, update the timer text, publish to a host.

use crate::error::BusError;
use crate::fan::{FanEntity, FanState, TimerSetting};

/// Structured events emitted by the fan core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanEvent {
    /// The service has started polling at this interval.
    Started { poll_interval_ms: u32 },

    /// The status register differs from the last published state.
    StateChanged { entity: FanEntity, state: FanState },

    /// The timer LEDs changed.
    TimerChanged(TimerSetting),

    /// A burst of this many button presses was accepted.
    ProcessingStarted { commands: usize },


    /// The post-burst re-read ran and the processing flag is clear.
    ProcessingFinished,

    /// A request arrived mid-burst and was ignored.
    RequestDropped,

    /// The status read failed; the poll cycle was skipped.
    BusReadFailed(BusError),
}
