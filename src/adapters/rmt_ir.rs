//! IR transmitter on an ESP32 RMT channel.
//!
//! The channel clock is divided down to 1 MHz so one tick is one
//! microsecond and codec durations map 1:1 onto RMT items.  The carrier
//! is modulated by the peripheral.

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::rmt::config::{CarrierConfig, DutyPercent, TransmitConfig};
use esp_idf_hal::rmt::{PinState, Pulse, PulseTicks, RmtChannel, TxRmtDriver, VariableLengthSignal};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::EspError;
use log::{debug, warn};

use crate::app::ports::IrTransmitPort;
use crate::ir::PulseTrain;

/// 80 MHz APB clock / 80 = 1 µs per tick.
const CLOCK_DIVIDER: u8 = 80;
const CARRIER_DUTY_PERCENT: u8 = 33;

pub struct RmtIrTransmitter<'d> {
    tx: TxRmtDriver<'d>,
}

impl<'d> RmtIrTransmitter<'d> {
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'd,
        pin: impl Peripheral<P = impl OutputPin> + 'd,
        carrier_hz: u32,
    ) -> Result<Self, EspError> {
        let carrier = CarrierConfig::new()
            .frequency(Hertz(carrier_hz))
            .duty_percent(DutyPercent::new(CARRIER_DUTY_PERCENT)?);
        let config = TransmitConfig::new()
            .clock_divider(CLOCK_DIVIDER)
            .carrier(Some(carrier));
        let tx = TxRmtDriver::new(channel, pin, &config)?;
        Ok(Self { tx })
    }

    /// Blocks until the last item is on the air.
    fn send(&mut self, train: &PulseTrain) -> Result<(), EspError> {
        let mut signal = VariableLengthSignal::with_capacity(train.len() * 2);
        for p in train.pulses() {
            let mark = Pulse::new(PinState::High, PulseTicks::new(ticks(p.mark_us))?);
            let space = Pulse::new(PinState::Low, PulseTicks::new(ticks(p.space_us))?);
            signal.push([&mark, &space])?;
        }
        debug!("RMT: {} pairs, {} us", train.len(), train.duration_us());
        self.tx.start_blocking(&signal)
    }
}

/// RMT items hold at most 15 bits of duration.
fn ticks(us: u32) -> u16 {
    us.min(u32::from(PulseTicks::max().ticks())) as u16
}

impl IrTransmitPort for RmtIrTransmitter<'_> {
    fn transmit(&mut self, train: &PulseTrain) {
        if let Err(e) = self.send(train) {
            warn!("IR transmit failed: {}", e);
        }
    }
}
