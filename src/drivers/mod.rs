//! Local input drivers.

pub mod button;
