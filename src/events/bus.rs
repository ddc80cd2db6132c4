//! Event Bus - central hub for cross-module communication
//!
//! Systems emit game events to the bus as they happen (pots, fouls, turn
//! changes); the banner UI and the session logger consume them. The rule
//! engine never reads the bus - it has its own `ShotEvents` accumulator.

use bevy::prelude::*;

use super::types::GameEvent;

/// Timestamped event for the event bus
#[derive(Debug, Clone)]
pub struct BusEvent {
    /// Time in milliseconds since session start
    pub time_ms: u32,
    /// The event data
    pub event: GameEvent,
}

/// Central event bus for cross-module communication
#[derive(Resource, Default)]
pub struct EventBus {
    /// Events emitted this frame, waiting to be consumed
    pending: Vec<BusEvent>,

    /// Events that have been consumed (kept until the logger writes them)
    processed: Vec<BusEvent>,

    /// Current elapsed time in milliseconds (for timestamping)
    elapsed_ms: u32,

    /// Whether the bus is enabled (disabled in some headless runs)
    enabled: bool,
}

impl EventBus {
    /// Create a new enabled event bus
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// Create a disabled event bus (events are dropped)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Update the elapsed time (called each frame)
    pub fn update_time(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs * 1000.0) as u32;
    }

    /// Emit an event to the bus
    pub fn emit(&mut self, event: GameEvent) {
        if !self.enabled {
            return;
        }
        self.pending.push(BusEvent {
            time_ms: self.elapsed_ms,
            event,
        });
    }

    /// Get pending events for consumption (does not drain)
    pub fn peek(&self) -> &[BusEvent] {
        &self.pending
    }

    /// Drain pending events, moving them to processed
    pub fn drain(&mut self) -> Vec<BusEvent> {
        let events = std::mem::take(&mut self.pending);
        self.processed.extend(events.clone());
        events
    }

    /// Get all processed events (for logging)
    pub fn processed(&self) -> &[BusEvent] {
        &self.processed
    }

    /// Clear processed events (after the logger has written them)
    pub fn clear_processed(&mut self) {
        self.processed.clear();
    }

    /// Get the number of pending events
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if the bus has any pending events
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Get current elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }
}

/// System to update the event bus time each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.update_time(time.elapsed_secs());
}
