//! Session event logger
//!
//! Writes every bus event to an `.evlog` file (one JSON object per line) so
//! finished matches can be audited shot by shot.

use bevy::prelude::*;
use serde_json::json;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::EventBus;
use super::types::GameEvent;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: true,
        }
    }
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open a file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Start a new log session: open the file and write a SessionStart line
    pub fn start_session(&mut self) {
        if !self.config.enabled {
            return;
        }

        self.session_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string();

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!("{}_{}.evlog", timestamp, &self.session_id[..8]);
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
        {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!(
                    "Event logging started: {} (session: {})",
                    path.display(),
                    &self.session_id[..8]
                );
                self.log(
                    0,
                    &GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp: chrono::Utc::now().to_rfc3339(),
                    },
                );
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Write a single event line
    pub fn log(&mut self, time_ms: u32, event: &GameEvent) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let line = json!({ "t": time_ms, "event": event });
        if let Err(e) = writeln!(writer, "{line}") {
            warn!("Failed to write event log: {}", e);
        }
    }

    /// Flush buffered lines to disk
    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }
}

/// System draining the bus into the session log each frame
pub fn flush_event_log(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    if !bus.has_pending() {
        return;
    }
    for bus_event in bus.drain() {
        logger.log(bus_event.time_ms, &bus_event.event);
    }
    logger.flush();
    bus.clear_processed();
}
