//! Session control, time source and filesystem layout.

pub mod session;
pub mod time;
pub mod utils;

pub use session::{Committed, LedgerView, Session};
pub use time::{Clock, FixedClock, SystemClock};
