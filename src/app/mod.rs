//! Application core: the fan facade and its boundary.
//!
//! Status polling, change detection and command sequencing live here.
//! The bus and the IR LED are reached only through the port traits in
//! [`ports`], so the whole layer runs on the host against mocks.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
