//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements      | Connects to                      |
//! |--------------|-----------------|----------------------------------|
//! | `hardware`   | StatusBusPort   | any status bus + IR transmitter  |
//! |              | IrTransmitPort  |                                  |
//! | `i2c_status` | StatusBusPort   | I/O expander on `embedded_hal` I²C |
//! | `log_sink`   | EventSink       | Serial log output                |
//! | `rmt_ir`     | IrTransmitPort  | ESP32 RMT channel, 38 kHz carrier |
//! | `time`       | ClockPort       | ESP32 system timer               |

pub mod hardware;
pub mod i2c_status;
pub mod log_sink;
#[cfg(feature = "espidf")]
pub mod rmt_ir;
pub mod time;
