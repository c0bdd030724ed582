//! Cooperative single-threaded timeline.
//!
//! Drives two kinds of work from one logical clock:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Poll tick (fixed period)      Named one-shot timeouts       │
//! │  ┌────────────────────┐        ┌──────────────┬────────────┐ │
//! │  │ every interval_ms  │        │ NextCommand  │ +300 ms    │ │
//! │  └─────────┬──────────┘        │ Resume       │ +50 ms     │ │
//! │            │                   └──────┬───────┴────────────┘ │
//! │            ▼                          ▼                      │
//! │        next_due(until_ms) ──▶ Fired ──▶ FanService::on_fired │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing runs on its own: the owner calls [`Scheduler::next_due`] in a
//! loop up to the current time and dispatches each [`Fired`] item.  The
//! clock jumps to each deadline as it fires.  Work that blocks (an IR
//! frame takes ~80 ms on the air) must call [`Scheduler::advance_to`]
//! with the real time afterwards, so timeouts armed next are measured
//! from when it finished.

use log::debug;

/// Named one-shot timeouts.  Arming a name that is already pending
/// replaces the earlier deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TimeoutId {
    /// Send the next queued command.
    NextCommand = 0,
    /// Quiescence elapsed: re-poll and release the processing flag.
    ResumeOperation = 1,
}

impl TimeoutId {
    pub const COUNT: usize = 2;

    pub const fn name(self) -> &'static str {
        match self {
            Self::NextCommand => "next_cmd",
            Self::ResumeOperation => "resume_operation",
        }
    }
}

/// Work item handed back by [`Scheduler::next_due`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    Timeout(TimeoutId),
    Poll,
}

#[derive(Debug, Clone, Copy)]
struct Timeout {
    due_ms: u64,
    /// Arm order; breaks ties between equal deadlines.
    seq: u64,
}

pub struct Scheduler {
    now_ms: u64,
    timeouts: [Option<Timeout>; TimeoutId::COUNT],
    poll_interval_ms: Option<u32>,
    next_poll_ms: u64,
    seq: u64,
}

impl Scheduler {
    /// Create a scheduler whose clock starts at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            timeouts: [None; TimeoutId::COUNT],
            poll_interval_ms: None,
            next_poll_ms: 0,
            seq: 0,
        }
    }

    /// Current position of the logical clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward to `now_ms`.  Never moves it back.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Start (or restart) the periodic poll tick.  First tick is one
    /// interval from now.
    pub fn set_poll_interval(&mut self, interval_ms: u32) {
        let interval_ms = interval_ms.max(1);
        self.poll_interval_ms = Some(interval_ms);
        self.next_poll_ms = self.now_ms + u64::from(interval_ms);
    }

    /// Arm a named timeout `delay_ms` from now, replacing any pending one
    /// with the same name.
    pub fn set_timeout(&mut self, id: TimeoutId, delay_ms: u32) {
        self.seq += 1;
        let due_ms = self.now_ms + u64::from(delay_ms);
        debug!("Scheduler: '{}' armed for t={}ms", id.name(), due_ms);
        self.timeouts[id as usize] = Some(Timeout {
            due_ms,
            seq: self.seq,
        });
    }

    /// Disarm a named timeout.  Returns `true` if one was pending.
    pub fn cancel_timeout(&mut self, id: TimeoutId) -> bool {
        self.timeouts[id as usize].take().is_some()
    }

    pub fn is_pending(&self, id: TimeoutId) -> bool {
        self.timeouts[id as usize].is_some()
    }

    /// Number of armed one-shot timeouts.
    pub fn pending_count(&self) -> usize {
        self.timeouts.iter().filter(|t| t.is_some()).count()
    }

    /// Pop the earliest item due at or before `until_ms`.
    ///
    /// Timeouts fire before a poll tick with the same deadline.  When
    /// nothing is due the clock moves to `until_ms` and `None` is returned.
    pub fn next_due(&mut self, until_ms: u64) -> Option<Fired> {
        let timeout = self
            .timeouts
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.map(|t| (i, t)))
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq));

        let poll_due = self
            .poll_interval_ms
            .filter(|_| self.next_poll_ms <= until_ms)
            .map(|interval| (self.next_poll_ms, interval));

        match (timeout, poll_due) {
            (Some((slot, t)), Some((poll_ms, _))) if t.due_ms <= poll_ms => {
                Some(self.fire_timeout(slot, t))
            }
            (Some((slot, t)), None) => Some(self.fire_timeout(slot, t)),
            (_, Some((poll_ms, interval))) => {
                self.now_ms = self.now_ms.max(poll_ms);
                // ticks missed while the clock was pushed ahead collapse into one
                let next = poll_ms + u64::from(interval);
                self.next_poll_ms = if next <= self.now_ms {
                    self.now_ms + u64::from(interval)
                } else {
                    next
                };
                Some(Fired::Poll)
            }
            (None, None) => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }

    fn fire_timeout(&mut self, slot: usize, timeout: Timeout) -> Fired {
        self.timeouts[slot] = None;
        self.now_ms = self.now_ms.max(timeout.due_ms);
        let id = if slot == TimeoutId::NextCommand as usize {
            TimeoutId::NextCommand
        } else {
            TimeoutId::ResumeOperation
        };
        Fired::Timeout(id)
    }
}
