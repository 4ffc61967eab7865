//! Monitoring Pipeline
//!
//! ```text
//! every interval (or on override injection):
//!   1. store write lock   -> stepper advances every ladle, override applied
//!   2. snapshot released  -> classify each ladle
//!   3. alert write lock   -> one entry per Critical ladle, newest first
//! ```
//!
//! Ticks are serialized by the stepper mutex, so an injected override never
//! interleaves with a scheduled tick. Stopping the loop cancels future ticks
//! only; a tick already running completes.

mod monitor;
mod state;

pub use monitor::LadleMonitor;
pub use state::*;
