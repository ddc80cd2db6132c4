//! Headless simulation support

pub mod app_builder;
pub mod runner;

pub use app_builder::HeadlessAppBuilder;
pub use runner::{MAX_SHOT_TICKS, run_until_idle, table_counts, take_shot};
