//! Event types, event bus, and session logging

pub mod bus;
pub mod logger;
pub mod types;

pub use bus::{BusEvent, EventBus, update_event_bus_time};
pub use logger::{EventLogConfig, EventLogger, flush_event_log};
pub use types::{FoulReason, GameEvent, PlayerId, event_kind};
