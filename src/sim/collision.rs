//! Collision detection for a circular ball against a player's box
//!
//! The ball is a circle, the player an axis-aligned rectangle. We find the
//! closest point on the rectangle to the ball centre and compare its distance
//! to the radius.

use glam::Vec2;

use super::state::Player;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Body box of a player (feet at `pos`)
    pub fn of_player(player: &Player) -> Self {
        let half_w = player.width / 2.0;
        Self {
            min: Vec2::new(player.pos.x - half_w, player.pos.y - player.height),
            max: Vec2::new(player.pos.x + half_w, player.pos.y),
        }
    }

    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Inclusive containment
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Where on the player's body the ball made contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitZone {
    Header,
    LeftSide,
    RightSide,
    Foot,
}

impl HitZone {
    /// Classify from the ball's position relative to the player's box
    pub fn classify(ball_pos: Vec2, player: &Player) -> Self {
        let aabb = Aabb::of_player(player);
        let rel_y = (ball_pos.y - aabb.min.y) / aabb.size().y;
        if rel_y < 0.25 {
            HitZone::Header
        } else if rel_y > 0.75 {
            HitZone::Foot
        } else if ball_pos.x < player.pos.x {
            HitZone::LeftSide
        } else {
            HitZone::RightSide
        }
    }

    /// x direction from the player's centre to this contact (0 for header/foot)
    pub fn side_dir(self) -> f32 {
        match self {
            HitZone::LeftSide => -1.0,
            HitZone::RightSide => 1.0,
            HitZone::Header | HitZone::Foot => 0.0,
        }
    }
}

/// Result of a ball-vs-box check
#[derive(Debug, Clone)]
pub struct Contact {
    /// Point on the box surface the ball rests against after push-out
    pub point: Vec2,
    /// Unit vector from the box toward the ball centre
    pub normal: Vec2,
    /// Overlap depth before push-out
    pub penetration: f32,
}

/// Check a circle against a box
///
/// Returns `None` when the circle does not overlap. When the centre is inside
/// the box the nearest edge wins (ties resolve left, right, top, bottom) and
/// the contact point is the centre projected onto that edge.
pub fn ball_box_contact(center: Vec2, radius: f32, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.closest_point(center);
    let delta = center - closest;
    let distance = delta.length();

    if distance >= radius {
        return None;
    }

    if aabb.contains(center) {
        let dist_left = center.x - aabb.min.x;
        let dist_right = aabb.max.x - center.x;
        let dist_top = center.y - aabb.min.y;
        let dist_bottom = aabb.max.y - center.y;
        let min_dist = dist_left.min(dist_right).min(dist_top).min(dist_bottom);

        let (normal, point) = if min_dist == dist_left {
            (Vec2::NEG_X, Vec2::new(aabb.min.x, center.y))
        } else if min_dist == dist_right {
            (Vec2::X, Vec2::new(aabb.max.x, center.y))
        } else if min_dist == dist_top {
            (Vec2::NEG_Y, Vec2::new(center.x, aabb.min.y))
        } else {
            (Vec2::Y, Vec2::new(center.x, aabb.max.y))
        };

        return Some(Contact {
            point,
            normal,
            penetration: radius + min_dist,
        });
    }

    Some(Contact {
        point: closest,
        normal: delta / distance,
        penetration: radius - distance,
    })
}

/// Distance from a point to the nearest point of a box (0 inside)
#[inline]
pub fn distance_to_box(p: Vec2, aabb: &Aabb) -> f32 {
    (p - aabb.closest_point(p)).length()
}
