//! PanaFan Firmware — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  I2cStatusBus      RmtIrTransmitter    LogEventSink          │
//! │  (StatusBusPort)   (IrTransmitPort)    (EventSink)           │
//! │  MonotonicClock    ButtonDriver (GPIO "Set Timer" key)       │
//! │  (ClockPort)                                                 │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  FanNode: FanService · Sequencer · TimerText · Button  │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  Scheduler (poll tick + one-shot pacing timeouts)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use panafan::adapters::hardware::FanHardware;
use panafan::adapters::i2c_status::I2cStatusBus;
use panafan::adapters::log_sink::LogEventSink;
use panafan::adapters::rmt_ir::RmtIrTransmitter;
use panafan::adapters::time::MonotonicClock;
use panafan::config::FanConfig;
use panafan::drivers::button::{ButtonDriver, ButtonEvent};
use panafan::node::FanNode;
use panafan::pins;

/// Granularity of the main loop; well under the poll interval.
const LOOP_PERIOD_MS: u32 = 5;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PanaFan v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config()?;

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: each GPIO number is claimed exactly once, here.
    let sda = unsafe { AnyIOPin::new(pins::I2C_SDA_GPIO) };
    let scl = unsafe { AnyIOPin::new(pins::I2C_SCL_GPIO) };
    let ir_pin = unsafe { AnyOutputPin::new(pins::IR_TX_GPIO) };
    let button_pin = unsafe { AnyIOPin::new(pins::SET_TIMER_BUTTON_GPIO) };

    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ));
    let i2c = I2cDriver::new(peripherals.i2c0, sda, scl, &i2c_config)?;
    let bus = I2cStatusBus::new(i2c, config.i2c_address);

    let ir = RmtIrTransmitter::new(peripherals.rmt.channel0, ir_pin, config.ir_carrier_hz)?;

    let mut button_input = PinDriver::input(button_pin)?;
    button_input.set_pull(Pull::Up)?;
    let mut button = ButtonDriver::new(pins::SET_TIMER_BUTTON_GPIO);

    // ── 4. Node ───────────────────────────────────────────────
    let clock = MonotonicClock::new();
    let mut node = FanNode::new(
        config,
        FanHardware::new(bus, ir),
        LogEventSink::new(),
        &clock,
    );
    node.setup();

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        // active low
        if let Some(ButtonEvent::Press) = button.tick(button_input.is_low(), clock.uptime_ms()) {
            node.press_set_timer();
        }
        node.run();
        FreeRtos::delay_ms(LOOP_PERIOD_MS);
    }
}

/// Defaults, optionally overridden at build time with a JSON document in
/// `PANAFAN_CONFIG`.
fn load_config() -> Result<FanConfig> {
    let config = match option_env!("PANAFAN_CONFIG") {
        Some(json) => FanConfig::from_json(json)?,
        None => FanConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
