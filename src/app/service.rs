//! Fan service: the hexagonal core.
//!
//! [`FanService`] owns the sequencer and the last published state.  It is
//! the only place the status bus and the IR transmitter are invoked from;
//! both arrive as port traits at each call site, so the service runs
//! against mocks on the host.
//!
//! ```text
//!  StatusBusPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                    │       FanService        │
//! IrTransmitPort ◀── │  decode · diff · pace   │
//!                    └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::FanConfig;
use crate::fan::{FanEntity, FanState, FanTraits};
use crate::scheduler::{Fired, Scheduler, TimeoutId};
use crate::sequencer::{RequestOutcome, Sequencer};
use crate::status::decode_status;

use super::commands::FanCommand;
use super::events::FanEvent;
use super::ports::{ClockPort, EventSink, IrTransmitPort, StatusBusPort};

// ───────────────────────────────────────────────────────────────
// FanService
// ───────────────────────────────────────────────────────────────

pub struct FanService {
    config: FanConfig,
    sequencer: Sequencer,
    /// Last published hardware state; `None` until the first good read.
    observed: Option<FanState>,
    entity: FanEntity,
    bus_failures: u64,
}

impl FanService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start polling; call [`start`](Self::start) next.
    pub fn new(config: FanConfig) -> Self {
        Self {
            config,
            sequencer: Sequencer::new(),
            observed: None,
            entity: FanEntity::default(),
            bus_failures: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Arm the periodic status poll.
    pub fn start(&mut self, sched: &mut Scheduler, sink: &mut impl EventSink) {
        let poll_interval_ms = self.config.poll_interval_ms;
        sched.set_poll_interval(poll_interval_ms);
        sink.emit(&FanEvent::Started { poll_interval_ms });
        info!("FanService started, polling every {} ms", poll_interval_ms);
    }

    pub fn log_config(&self) {
        let traits = self.traits();
        info!("PanaFan:");
        info!("  Model: {}", self.config.model.name());
        info!("  Update interval: {} ms", self.config.poll_interval_ms);
        info!("  I2C address: 0x{:02X}", self.config.i2c_address);
        info!("  IR carrier: {} Hz", self.config.ir_carrier_hz);
        info!(
            "  Traits: oscillation={} speed={} ({} levels) direction={}",
            traits.oscillation, traits.speed, traits.speed_count, traits.direction
        );
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a command from the automation layer.
    pub fn handle_command(
        &mut self,
        cmd: FanCommand,
        ir: &mut impl IrTransmitPort,
        clock: &impl ClockPort,
        sched: &mut Scheduler,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            FanCommand::Control(desired) => {
                match self.sequencer.request(&self.entity, &desired, ir, clock, sched) {
                    RequestOutcome::Dropped => {
                        warn!("Control request ignored, still sending the previous one");
                        sink.emit(&FanEvent::RequestDropped);
                    }
                    RequestOutcome::Unchanged => {
                        debug!("Control request matches current state");
                    }
                    RequestOutcome::Accepted(commands) => {
                        sink.emit(&FanEvent::ProcessingStarted { commands });
                    }
                }
            }
            FanCommand::CycleTimer => {
                let was_processing = self.sequencer.is_processing();
                if self.sequencer.cycle_timer(self.entity.on, ir, clock, sched) && !was_processing {
                    sink.emit(&FanEvent::ProcessingStarted { commands: 1 });
                }
            }
        }
    }

    // ── Timeline ──────────────────────────────────────────────

    /// Dispatch one item popped from the scheduler.
    ///
    /// `hw` satisfies **both** ports; taking it once avoids a double
    /// mutable borrow.
    pub fn on_fired(
        &mut self,
        fired: Fired,
        hw: &mut (impl StatusBusPort + IrTransmitPort),
        clock: &impl ClockPort,
        sched: &mut Scheduler,
        sink: &mut impl EventSink,
    ) {
        match fired {
            Fired::Poll => {
                // never read the panel in the middle of a burst
                if self.sequencer.is_processing() {
                    return;
                }
                self.poll(hw, sink);
            }
            Fired::Timeout(TimeoutId::NextCommand) => {
                self.sequencer.drain(hw, clock, sched);
            }
            Fired::Timeout(TimeoutId::ResumeOperation) => {
                self.poll(hw, sink);
                if self.sequencer.finish(sched) {
                    info!("Command burst complete");
                    sink.emit(&FanEvent::ProcessingFinished);
                }
            }
        }
    }

    /// Read and decode the status register once, publishing on change.
    /// Returns `true` if anything was published.
    pub fn poll(&mut self, bus: &mut impl StatusBusPort, sink: &mut impl EventSink) -> bool {
        match bus.read_status() {
            Ok(raw) => self.publish(decode_status(raw), sink),
            Err(e) => {
                self.bus_failures += 1;
                warn!("Status read failed: {} ({} so far)", e, self.bus_failures);
                sink.emit(&FanEvent::BusReadFailed(e));
                false
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last published hardware state (`None` before the first good read).
    pub fn observed(&self) -> Option<FanState> {
        self.observed
    }

    /// The fan as the automation layer sees it.
    pub fn entity(&self) -> FanEntity {
        self.entity
    }

    pub fn traits(&self) -> FanTraits {
        self.config.traits()
    }

    pub fn config(&self) -> &FanConfig {
        &self.config
    }

    pub fn is_processing(&self) -> bool {
        self.sequencer.is_processing()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn bus_failures(&self) -> u64 {
        self.bus_failures
    }

    // ── Internal ──────────────────────────────────────────────

    fn publish(&mut self, state: FanState, sink: &mut impl EventSink) -> bool {
        let previous = self.observed;
        if previous == Some(state) {
            return false;
        }

        self.observed = Some(state);
        self.entity.on = state.is_on();
        if state.is_on() {
            // keep the last running speed while off
            self.entity.speed = state.speed;
        }
        self.entity.oscillating = state.oscillation.is_on();

        debug!("Status changed: {:?}", state);
        sink.emit(&FanEvent::StateChanged {
            entity: self.entity,
            state,
        });

        if previous.map(|s| s.timer) != Some(state.timer) {
            sink.emit(&FanEvent::TimerChanged(state.timer));
        }
        true
    }
}
