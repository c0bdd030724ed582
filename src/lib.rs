//! PanaFan controller library.
//!
//! Drives a ceiling fan's IR receiver like its handheld remote, and reads
//! the receiver's front-panel LEDs over I²C to learn what the fan is
//! actually doing.  Everything except the ESP-IDF adapters is plain logic
//! and runs on the host; the device-only parts are behind the `espidf`
//! feature.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod drivers;
pub mod entities;
pub mod error;
pub mod fan;
pub mod ir;
pub mod node;
pub mod scheduler;
pub mod sequencer;
pub mod status;

pub mod adapters;
pub mod pins;
