//! Composition root.
//!
//! [`FanNode`] owns the service, the timeline, the hardware and the
//! auxiliary entities, and is the whole automation-facing surface.
//! Entities get events and hand back commands through the node; nothing
//! holds a pointer to anything else.
//!
//! The node owns the clock as well.  Every command and every pass of
//! [`FanNode::run`] first brings the timeline up to the wall clock, so
//! pacing delays armed in response are counted from real time.

use log::info;

use crate::app::commands::FanCommand;
use crate::app::ports::{ClockPort, EventSink, IrTransmitPort, StatusBusPort};
use crate::app::service::FanService;
use crate::config::FanConfig;
use crate::entities::{SetTimerButton, TimerText};
use crate::fan::{DesiredState, FanEntity, FanState, FanTraits};
use crate::scheduler::Scheduler;

pub struct FanNode<H, S, C> {
    service: FanService,
    scheduler: Scheduler,
    clock: C,
    hw: H,
    sink: S,
    timer_text: TimerText,
    set_timer: SetTimerButton,
}

impl<H, S, C> FanNode<H, S, C>
where
    H: StatusBusPort + IrTransmitPort,
    S: EventSink,
    C: ClockPort,
{
    /// Wire everything up; the timeline starts at the clock's current
    /// reading.  Call [`setup`](Self::setup) before driving it.
    pub fn new(config: FanConfig, hw: H, sink: S, clock: C) -> Self {
        Self {
            service: FanService::new(config),
            scheduler: Scheduler::new(clock.now_ms()),
            clock,
            hw,
            sink,
            timer_text: TimerText::new(),
            set_timer: SetTimerButton,
        }
    }

    pub fn setup(&mut self) {
        self.service.log_config();
        let mut sinks = (&mut self.timer_text, &mut self.sink);
        self.service.start(&mut self.scheduler, &mut sinks);
    }

    // ── Automation surface ────────────────────────────────────

    /// Ask for a (partial) state.  Silently ignored while a previous
    /// request is still being sent.
    pub fn request(&mut self, desired: DesiredState) {
        self.dispatch(FanCommand::Control(desired));
    }

    /// Step the off-timer once, if the fan is running.
    pub fn cycle_timer(&mut self) {
        self.dispatch(FanCommand::CycleTimer);
    }

    /// The "Set Timer" button entity was pressed.
    pub fn press_set_timer(&mut self) {
        info!("'{}' pressed", SetTimerButton::NAME);
        let cmd = self.set_timer.press();
        self.dispatch(cmd);
    }

    pub fn dispatch(&mut self, cmd: FanCommand) {
        self.scheduler.advance_to(self.clock.now_ms());
        let mut sinks = (&mut self.timer_text, &mut self.sink);
        self.service.handle_command(
            cmd,
            &mut self.hw,
            &self.clock,
            &mut self.scheduler,
            &mut sinks,
        );
    }

    /// Run everything that is due by the clock's current reading.
    pub fn run(&mut self) -> usize {
        let now_ms = self.clock.now_ms();
        self.run_until(now_ms)
    }

    /// Run every poll tick and timeout due up to `now_ms`, in order.
    /// Returns how many items fired.
    pub fn run_until(&mut self, now_ms: u64) -> usize {
        let mut fired_count = 0;
        let mut sinks = (&mut self.timer_text, &mut self.sink);
        while let Some(fired) = self.scheduler.next_due(now_ms) {
            self.service.on_fired(
                fired,
                &mut self.hw,
                &self.clock,
                &mut self.scheduler,
                &mut sinks,
            );
            fired_count += 1;
        }
        fired_count
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last published hardware state; `None` before the first good read.
    pub fn observed(&self) -> Option<FanState> {
        self.service.observed()
    }

    pub fn entity(&self) -> FanEntity {
        self.service.entity()
    }

    pub fn traits(&self) -> FanTraits {
        self.service.traits()
    }

    pub fn timer_label(&self) -> &'static str {
        self.timer_text.state()
    }

    pub fn timer_text(&self) -> &TimerText {
        &self.timer_text
    }

    pub fn is_processing(&self) -> bool {
        self.service.is_processing()
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn service(&self) -> &FanService {
        &self.service
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
