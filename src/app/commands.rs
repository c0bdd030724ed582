//! Inbound commands to the fan service.
//!
//! These come from the automation layer (fan entity calls, the "Set
//! Timer" button) and are interpreted by
//! [`FanService`](super::service::FanService).

use crate::fan::DesiredState;

/// Commands that the outside world can send into the fan core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanCommand {
    /// Move the fan towards a (partial) desired state.
    Control(DesiredState),

    /// Press TIMER once (only honoured while the fan runs).
    CycleTimer,
}
