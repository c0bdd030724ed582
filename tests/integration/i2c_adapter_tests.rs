//! `I2cStatusBus` against a fake `embedded_hal` bus.

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use panafan::adapters::i2c_status::I2cStatusBus;
use panafan::app::ports::StatusBusPort;
use panafan::error::BusError;
use panafan::fan::{Oscillation, Speed, TimerSetting};
use panafan::status::decode_status;

/// Answers reads at one address with a fixed register image.
struct FakeExpander {
    address: u8,
    register: [u8; 2],
    fail_with: Option<ErrorKind>,
    seen_addresses: Vec<u8>,
}

impl FakeExpander {
    fn new(address: u8, register: [u8; 2]) -> Self {
        Self {
            address,
            register,
            fail_with: None,
            seen_addresses: Vec::new(),
        }
    }
}

impl ErrorType for FakeExpander {
    type Error = ErrorKind;
}

impl I2c for FakeExpander {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.seen_addresses.push(address);
        if let Some(kind) = self.fail_with {
            return Err(kind);
        }
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for op in operations {
            if let Operation::Read(buf) = op {
                for (dst, src) in buf.iter_mut().zip(self.register) {
                    *dst = src;
                }
            }
        }
        Ok(())
    }
}

#[test]
fn reads_both_ports_at_the_configured_address() {
    let mut bus = I2cStatusBus::new(FakeExpander::new(0x20, [0x6F, 0x7F]), 0x20);
    let raw = bus.read_status().unwrap();
    assert_eq!(raw, [0x6F, 0x7F]);

    let state = decode_status(raw);
    assert_eq!(state.speed, Speed::Low);
    assert_eq!(state.oscillation, Oscillation::On);
    assert_eq!(state.timer, TimerSetting::OneHour);

    assert_eq!(bus.release().seen_addresses, vec![0x20]);
}

#[test]
fn missing_device_is_a_nack() {
    let mut bus = I2cStatusBus::new(FakeExpander::new(0x21, [0xFF, 0xFF]), 0x20);
    assert_eq!(bus.read_status(), Err(BusError::Nack));
}

#[test]
fn driver_errors_are_mapped() {
    let mut fake = FakeExpander::new(0x20, [0xFF, 0xFF]);
    fake.fail_with = Some(ErrorKind::ArbitrationLoss);
    let mut bus = I2cStatusBus::new(fake, 0x20);
    assert_eq!(bus.read_status(), Err(BusError::ArbitrationLoss));
}
