//! Pairwise ball-ball collision resolution

use bevy::prelude::*;

use crate::ball::components::*;
use crate::constants::*;
use crate::rules::ShotEvents;
use crate::tuning::PhysicsTweaks;

/// Resolve every unordered pair of unpotted balls: separate overlapping
/// balls, then apply a restitution impulse to approaching pairs.
///
/// The positional correction splits the overlap evenly between the two
/// balls. All balls share one mass value, so the even split matches the
/// mass-weighted one; the impulse keeps the full two-mass form.
///
/// The first approaching cue contact of a shot is recorded in `ShotEvents`
/// and never overwritten until the shot is adjudicated.
pub fn resolve_ball_collisions(
    tweaks: Res<PhysicsTweaks>,
    mut shot_events: ResMut<ShotEvents>,
    mut query: Query<(&BallCategory, &mut Transform, &mut Velocity, &Potted), With<Ball>>,
) {
    let mut pairs = query.iter_combinations_mut();
    while let Some([a, b]) = pairs.fetch_next() {
        let (cat_a, mut transform_a, mut vel_a, potted_a) = a;
        let (cat_b, mut transform_b, mut vel_b, potted_b) = b;

        if potted_a.0 || potted_b.0 {
            continue;
        }

        let delta = transform_b.translation.truncate() - transform_a.translation.truncate();
        let dist = delta.length();
        let min_dist = BALL_RADIUS * 2.0;
        // A zero distance would make the normal undefined
        if dist <= 0.0 || dist >= min_dist {
            continue;
        }

        let normal = delta / dist;
        let overlap = (min_dist - dist) / 2.0;
        transform_a.translation.x -= normal.x * overlap;
        transform_a.translation.y -= normal.y * overlap;
        transform_b.translation.x += normal.x * overlap;
        transform_b.translation.y += normal.y * overlap;

        let rel_vel = (vel_b.0 - vel_a.0).dot(normal);
        if rel_vel >= 0.0 {
            // Already separating; the overlap fix above is enough
            continue;
        }

        if shot_events.first_contact.is_none() {
            if *cat_a == BallCategory::Cue && *cat_b != BallCategory::Cue {
                shot_events.first_contact = Some(*cat_b);
            } else if *cat_b == BallCategory::Cue && *cat_a != BallCategory::Cue {
                shot_events.first_contact = Some(*cat_a);
            }
        }

        let e = tweaks.ball_restitution;
        let impulse = -(1.0 + e) * rel_vel / (1.0 / BALL_MASS + 1.0 / BALL_MASS);
        vel_a.0 -= impulse * normal / BALL_MASS;
        vel_b.0 += impulse * normal / BALL_MASS;
    }
}
