//! Status register over I²C.
//!
//! The front panel sits behind a 16-bit quasi-bidirectional I/O expander:
//! a plain two-byte read with no register pointer returns both ports.
//! Works with any `embedded_hal::i2c::I2c` bus (the ESP-IDF driver on the
//! device, a fake in tests).

use embedded_hal::i2c::{Error as _, I2c};
use log::debug;

use crate::app::ports::StatusBusPort;
use crate::error::BusError;

pub struct I2cStatusBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cStatusBus<I> {
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back (e.g. to share it with another device).
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> StatusBusPort for I2cStatusBus<I> {
    fn read_status(&mut self) -> Result<[u8; 2], BusError> {
        let mut raw = [0u8; 2];
        self.i2c.read(self.address, &mut raw).map_err(|e| {
            debug!("I2C read at 0x{:02X} failed: {:?}", self.address, e.kind());
            BusError::from(e.kind())
        })?;
        Ok(raw)
    }
}
