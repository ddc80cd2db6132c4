//! Transient announcement banner

use bevy::prelude::*;

use crate::constants::*;
use crate::events::EventBus;

/// Current banner message and how long it stays visible
#[derive(Resource, Default)]
pub struct Banner {
    pub text: String,
    pub timer: f32,
}

/// Marker for the banner text entity
#[derive(Component)]
pub struct MessageBanner;

/// Show the latest announceable event; fade out after a fixed duration.
/// Must run before the logger drains the bus.
pub fn update_banner(
    time: Res<Time>,
    bus: Res<EventBus>,
    mut banner: ResMut<Banner>,
    mut text_query: Query<&mut Text2d, With<MessageBanner>>,
) {
    // Later announcements replace earlier ones within the same frame
    for bus_event in bus.peek() {
        if let Some(message) = bus_event.event.describe() {
            banner.text = message;
            banner.timer = BANNER_DURATION;
        }
    }

    if banner.timer > 0.0 {
        banner.timer = (banner.timer - time.delta_secs()).max(0.0);
        if banner.timer == 0.0 {
            banner.text.clear();
        }
    }

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = banner.text.clone();
}
