//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every fan event as one line to the
//! ESP-IDF logger (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::FanEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`FanEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &FanEvent) {
        match event {
            FanEvent::Started { poll_interval_ms } => {
                info!("START | poll_interval={}ms", poll_interval_ms);
            }
            FanEvent::StateChanged { entity, state } => {
                info!(
                    "STATE | on={} speed={:?} oscillating={} | leds: speed={:?} swing={:?} timer={}",
                    entity.on,
                    entity.speed,
                    entity.oscillating,
                    state.speed,
                    state.oscillation,
                    state.timer.label(),
                );
            }
            FanEvent::TimerChanged(timer) => {
                info!("TIMER | {}", timer.label());
            }
            FanEvent::ProcessingStarted { commands } => {
                info!("SEND  | {} command(s)", commands);
            }
            FanEvent::ProcessingFinished => {
                info!("SEND  | done");
            }
            FanEvent::RequestDropped => {
                warn!("SEND  | busy, request dropped");
            }
            FanEvent::BusReadFailed(e) => {
                warn!("BUS   | read failed: {}", e);
            }
        }
    }
}
