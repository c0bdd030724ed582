//! Command sequencer: turns a desired-state request into paced button
//! presses.
//!
//! ```text
//!            request (diff non-empty)        queue empty
//!   ┌──────┐ ───────────────────────▶ ┌──────────┐ ──────▶ resume (+50 ms)
//!   │ Idle │                          │ Draining │           │
//!   └──────┘ ◀─────────────────────── └──────────┘ ◀─────────┘
//!                finish (queue still empty)   next_cmd (+300 ms)
//! ```
//!
//! The sequencer never touches the observed state.  It only emits pulses
//! and arms timeouts; the hardware is re-read by the service once the
//! burst is over.  A frame blocks for its whole airtime, so both
//! timeouts are armed from the clock reading taken after `transmit`
//! returns, not from the deadline that started the send.

use heapless::{Deque, Vec};
use log::{debug, info, warn};

use crate::app::ports::{ClockPort, IrTransmitPort};
use crate::fan::{DesiredState, FanEntity, Speed};
use crate::ir::Command;
use crate::scheduler::{Scheduler, TimeoutId};

/// Gap between two presses so the receiver registers them separately.
pub const COMMAND_SPACING_MS: u32 = 300;
/// Quiet time after the last press before the panel is re-read.
pub const RESUME_DELAY_MS: u32 = 50;
pub const QUEUE_CAPACITY: usize = 16;
/// Longest possible diff: power, a full speed cycle, swing.
pub const MAX_DIFF: usize = 2 + Speed::LEVELS as usize;

/// What happened to a desired-state request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A previous burst is still in flight; nothing was touched.
    Dropped,
    /// Already in the requested state.
    Unchanged,
    /// This many commands were queued.
    Accepted(usize),
}

/// Button presses needed to move the fan from `current` to `desired`,
/// in transmit order.
pub fn diff(current: &FanEntity, desired: &DesiredState) -> Vec<Command, MAX_DIFF> {
    let mut commands: Vec<Command, MAX_DIFF> = Vec::new();
    let mut push = |cmd: Command| {
        let pushed = commands.push(cmd).is_ok();
        debug_assert!(pushed, "diff longer than MAX_DIFF");
    };

    match desired.power {
        Some(false) if current.on => push(Command::PowerToggle),
        Some(true) if !current.on => push(Command::PowerToggle),
        _ => {}
    }

    if desired.power == Some(true) {
        if let Some(target) = desired.speed.filter(|s| *s != Speed::Off) {
            let mut delta = i16::from(target.level()) - i16::from(current.speed.level());
            if delta < 0 {
                delta += i16::from(Speed::LEVELS);
            }
            for _ in 0..delta {
                push(Command::SpeedStep);
            }
        }
    }

    if let Some(oscillating) = desired.oscillating {
        if oscillating != current.oscillating {
            push(Command::OscillateToggle);
        }
    }

    commands
}

#[derive(Debug, Default)]
pub struct Sequencer {
    queue: Deque<Command, QUEUE_CAPACITY>,
    processing: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The processing flag: set from acceptance until the post-burst
    /// re-read has run.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Commands still waiting to be sent, front first.
    pub fn pending(&self) -> impl Iterator<Item = Command> + '_ {
        self.queue.iter().copied()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Accept a desired state unless a burst is already in flight.  The
    /// first command goes out immediately.
    pub fn request(
        &mut self,
        current: &FanEntity,
        desired: &DesiredState,
        ir: &mut impl IrTransmitPort,
        clock: &impl ClockPort,
        sched: &mut Scheduler,
    ) -> RequestOutcome {
        if self.processing {
            debug!("Sequencer: busy, request {:?} dropped", desired);
            return RequestOutcome::Dropped;
        }

        let commands = diff(current, desired);
        if commands.is_empty() {
            return RequestOutcome::Unchanged;
        }

        for cmd in &commands {
            self.enqueue(*cmd);
        }
        info!("Sequencer: {} command(s) queued", commands.len());
        self.processing = true;
        self.drain(ir, clock, sched);
        RequestOutcome::Accepted(commands.len())
    }

    /// Queue one TIMER press.  Only accepted while the fan runs; joins a
    /// burst that is already in flight.
    pub fn cycle_timer(
        &mut self,
        fan_on: bool,
        ir: &mut impl IrTransmitPort,
        clock: &impl ClockPort,
        sched: &mut Scheduler,
    ) -> bool {
        if !fan_on {
            debug!("Sequencer: fan is off, timer press ignored");
            return false;
        }
        if !self.enqueue(Command::TimerCycle) {
            return false;
        }
        if !self.processing {
            self.processing = true;
            self.drain(ir, clock, sched);
        }
        true
    }

    /// Send the next queued command.  Re-arms itself while more are
    /// waiting; arms the quiescence timeout once the queue runs dry.
    pub fn drain(
        &mut self,
        ir: &mut impl IrTransmitPort,
        clock: &impl ClockPort,
        sched: &mut Scheduler,
    ) -> Option<Command> {
        if !self.processing {
            return None;
        }

        let Some(cmd) = self.queue.pop_front() else {
            Self::arm_resume(sched);
            return None;
        };

        debug!("Sequencer: sending {}", cmd.name());
        ir.transmit(&cmd.to_pulses());
        sched.advance_to(clock.now_ms());

        if self.queue.is_empty() {
            Self::arm_resume(sched);
        } else {
            sched.set_timeout(TimeoutId::NextCommand, COMMAND_SPACING_MS);
        }
        Some(cmd)
    }

    /// End of the quiescence step.  Releases the flag, unless a press
    /// was queued meanwhile; that one goes out after the usual spacing.
    /// Returns `true` when the sequencer is idle again.
    pub fn finish(&mut self, sched: &mut Scheduler) -> bool {
        if !self.queue.is_empty() {
            sched.set_timeout(TimeoutId::NextCommand, COMMAND_SPACING_MS);
            return false;
        }
        self.processing = false;
        true
    }

    fn arm_resume(sched: &mut Scheduler) {
        sched.set_timeout(TimeoutId::ResumeOperation, RESUME_DELAY_MS);
    }

    fn enqueue(&mut self, cmd: Command) -> bool {
        if self.queue.push_back(cmd).is_err() {
            warn!("Sequencer: queue full, {} dropped", cmd.name());
            return false;
        }
        true
    }
}
