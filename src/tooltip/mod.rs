//! Tooltip trigger handling
//!
//! A tooltip moves through `Closed -> Pending -> Open -> Closed`. The machine
//! in [`machine`] owns that state and talks to the outside world only through
//! the [`TooltipHost`] trait, so the same logic drives the browser host in
//! `crate::dom` and the recording host used in tests.

pub mod config;
pub mod host;
pub mod machine;

pub use config::{TooltipConfig, TriggerMode, DEFAULT_DELAY_MS};
pub use host::TooltipHost;
pub use machine::{Interaction, Key, TooltipMachine, TooltipSnapshot, TooltipState};
