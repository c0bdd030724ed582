//! Hardware adapter: bridges the two peripherals to the domain ports.
//!
//! [`FanService::on_fired`](crate::app::service::FanService::on_fired)
//! needs the status bus and the IR transmitter in the same call.  Bundling
//! them here gives it a single `&mut` that satisfies both ports.

use crate::app::ports::{IrTransmitPort, StatusBusPort};
use crate::error::BusError;
use crate::ir::PulseTrain;

/// Concrete adapter that combines the fan's peripherals behind port traits.
pub struct FanHardware<B, T> {
    bus: B,
    ir: T,
}

impl<B: StatusBusPort, T: IrTransmitPort> FanHardware<B, T> {
    pub fn new(bus: B, ir: T) -> Self {
        Self { bus, ir }
    }
}

// ── StatusBusPort implementation ──────────────────────────────

impl<B: StatusBusPort, T> StatusBusPort for FanHardware<B, T> {
    fn read_status(&mut self) -> Result<[u8; 2], BusError> {
        self.bus.read_status()
    }
}

// ── IrTransmitPort implementation ─────────────────────────────

impl<B, T: IrTransmitPort> IrTransmitPort for FanHardware<B, T> {
    fn transmit(&mut self, train: &PulseTrain) {
        self.ir.transmit(train);
    }
}
