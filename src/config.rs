//! Node configuration parameters
//!
//! Everything about the installation that may differ between units.
//! Protocol timings and command pacing are fixed by the receiver and are
//! deliberately not in here.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fan::{FanTraits, Speed};

/// Supported fan models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    #[default]
    F409M,
}

impl Model {
    pub const fn name(self) -> &'static str {
        match self {
            Self::F409M => "F409M",
        }
    }

    /// Capabilities this model exposes to the automation layer.
    pub const fn traits(self) -> FanTraits {
        match self {
            Self::F409M => FanTraits {
                oscillation: true,
                speed: true,
                direction: false,
                speed_count: Speed::LEVELS,
            },
        }
    }
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    pub model: Model,

    // --- Status bus ---
    /// Status register poll period (milliseconds)
    pub poll_interval_ms: u32,
    /// 7-bit I²C address of the front-panel I/O expander
    pub i2c_address: u8,

    // --- IR ---
    /// Carrier frequency of the IR LED (Hz)
    pub ir_carrier_hz: u32,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            model: Model::F409M,
            poll_interval_ms: 10,
            i2c_address: 0x20,
            ir_carrier_hz: 38_000,
        }
    }
}

impl FanConfig {
    /// Parse from JSON.  Missing fields take their defaults; the result is
    /// validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        // 0x00-0x07 and 0x78-0x7F are reserved in 7-bit addressing
        if !(0x08..=0x77).contains(&self.i2c_address) {
            return Err(ConfigError::InvalidAddress(self.i2c_address));
        }
        if !(30_000..=60_000).contains(&self.ir_carrier_hz) {
            return Err(ConfigError::InvalidCarrier);
        }
        Ok(())
    }

    pub fn traits(&self) -> FanTraits {
        self.model.traits()
    }
}
