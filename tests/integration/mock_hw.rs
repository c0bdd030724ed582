//! Mock hardware for integration tests.
//!
//! [`SimulatedFan`] stands in for the real receiver: it decodes every IR
//! frame it is sent, applies the button press to an internal model and
//! answers status reads with the LED pattern that model would light.
//! Reads can be made to fail on demand.  Given a [`ManualClock`], each
//! frame also holds the clock for its on-air time, like the blocking RMT
//! transmit does on the device.

use std::cell::Cell;
use std::rc::Rc;

use panafan::app::events::FanEvent;
use panafan::app::ports::{ClockPort, EventSink, IrTransmitPort, StatusBusPort};
use panafan::error::BusError;
use panafan::ir::{Command, PulseTrain, decode};
use panafan::status::Led;

// ── ManualClock ───────────────────────────────────────────────

/// Shared millisecond clock that only moves when told to.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now()
    }
}

// ── SimulatedFan ──────────────────────────────────────────────

pub struct SimulatedFan {
    pub on: bool,
    /// 1..=3; kept while off.
    pub level: u8,
    pub swing: bool,
    /// 0 = off, 1 = 1h, 2 = 3h, 3 = 6h.
    pub timer: u8,
    /// Every frame received, decoded.
    pub received: Vec<Command>,
    pub reads: usize,
    pub fail_reads: usize,
    /// Set by [`with_airtime`](Self::with_airtime).
    clock: Option<ManualClock>,
    /// (start, end) of each frame, timed mode only.
    pub frames: Vec<(u64, u64)>,
    /// Clock reading at each status read, timed mode only.
    pub read_times: Vec<u64>,
}

#[allow(dead_code)]
impl SimulatedFan {
    pub fn new() -> Self {
        Self {
            on: false,
            level: 1,
            swing: false,
            timer: 0,
            received: Vec::new(),
            reads: 0,
            fail_reads: 0,
            clock: None,
            frames: Vec::new(),
            read_times: Vec::new(),
        }
    }

    /// Make every frame take its real on-air time on `clock`.
    pub fn with_airtime(self, clock: ManualClock) -> Self {
        Self {
            clock: Some(clock),
            ..self
        }
    }

    pub fn running(level: u8) -> Self {
        Self {
            on: true,
            level,
            ..Self::new()
        }
    }

    /// Make the next `n` status reads fail.
    pub fn fail_next_reads(&mut self, n: usize) {
        self.fail_reads = n;
    }

    fn press(&mut self, cmd: Command) {
        match cmd {
            Command::PowerToggle => {
                self.on = !self.on;
                if !self.on {
                    self.timer = 0;
                    self.swing = false;
                }
            }
            Command::SpeedStep if self.on => self.level = self.level % 3 + 1,
            Command::OscillateToggle if self.on => self.swing = !self.swing,
            Command::TimerCycle if self.on => self.timer = (self.timer + 1) % 4,
            _ => {}
        }
    }

    /// Active-low register image of the current model.
    pub fn register(&self) -> [u8; 2] {
        let mut lit: u16 = 0;
        if self.on {
            lit |= match self.level {
                1 => Led::Low.mask(),
                2 => Led::Medium.mask(),
                _ => Led::High.mask(),
            };
            if self.swing {
                lit |= Led::Oscillate.mask();
            }
            lit |= match self.timer {
                1 => Led::Timer1h.mask(),
                2 => Led::Timer3h.mask(),
                3 => Led::Timer6h.mask(),
                _ => 0,
            };
        }
        [!(lit as u8), !((lit >> 8) as u8)]
    }
}

impl Default for SimulatedFan {
    fn default() -> Self {
        Self::new()
    }
}

impl IrTransmitPort for SimulatedFan {
    fn transmit(&mut self, train: &PulseTrain) {
        let bytes = decode(train).expect("sequencer sent an undecodable frame");
        let cmd = Command::from_payload(&bytes).expect("unknown payload");
        self.received.push(cmd);
        if let Some(clock) = &self.clock {
            let start = clock.now();
            clock.advance(train.duration_us().div_ceil(1000));
            self.frames.push((start, clock.now()));
        }
        self.press(cmd);
    }
}

impl StatusBusPort for SimulatedFan {
    fn read_status(&mut self) -> Result<[u8; 2], BusError> {
        self.reads += 1;
        if let Some(clock) = &self.clock {
            self.read_times.push(clock.now());
        }
        if self.fail_reads > 0 {
            self.fail_reads -= 1;
            return Err(BusError::Nack);
        }
        Ok(self.register())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<FanEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&FanEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &FanEvent) {
        self.events.push(*event);
    }
}
