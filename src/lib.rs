//! Case studies for a composable, unidirectional state-management runtime.

pub mod architecture;
pub mod catalog;
pub mod config;
pub mod demos;
pub mod logging;
