//! System-level modules
//!
//! Process-wide setup that is not part of the prediction path.

pub mod logging;

pub use logging::init_logging;
