//! Auxiliary entities published next to the fan.
//!
//! Neither entity holds a reference to the fan.  The text follows
//! [`FanEvent::TimerChanged`] as an event sink; the button only produces
//! a [`FanCommand`] that the owning node routes to the service.

use log::info;

use crate::app::commands::FanCommand;
use crate::app::events::FanEvent;
use crate::app::ports::EventSink;
use crate::fan::TimerSetting;

/// Read-only text showing the remaining off-timer setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerText {
    setting: TimerSetting,
}

impl TimerText {
    pub const NAME: &'static str = "Timer";
    pub const ICON: &'static str = "mdi:timer-outline";

    pub fn new() -> Self {
        Self {
            setting: TimerSetting::Off,
        }
    }

    pub fn state(&self) -> &'static str {
        self.setting.label()
    }

    pub fn setting(&self) -> TimerSetting {
        self.setting
    }
}

impl Default for TimerText {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for TimerText {
    fn emit(&mut self, event: &FanEvent) {
        if let FanEvent::TimerChanged(setting) = *event {
            self.setting = setting;
            info!("'{}': {}", Self::NAME, setting.label());
        }
    }
}

/// Momentary button that steps the off-timer once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetTimerButton;

impl SetTimerButton {
    pub const NAME: &'static str = "Set Timer";

    pub fn press(&self) -> FanCommand {
        FanCommand::CycleTimer
    }
}
