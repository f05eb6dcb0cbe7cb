//! Physics invariants over randomised states

use bug_ball_blitz::BugStats;
use bug_ball_blitz::sim::{Aabb, Ball, Physics, PhysicsConfig, Player, Side, distance_to_box};
use glam::Vec2;
use proptest::prelude::*;

fn physics() -> Physics {
    Physics::new(PhysicsConfig::with_size(1000.0, 700.0))
}

fn stats() -> BugStats {
    BugStats {
        speed: 0.8,
        jump: 0.8,
        power: 0.75,
        size: 1.0,
    }
}

proptest! {
    /// The ball never ends a step below the ground line
    #[test]
    fn prop_ball_never_sinks(
        x in 15.0f32..985.0,
        y in 15.0f32..475.0,
        vx in -40.0f32..40.0,
        vy in -40.0f32..40.0,
    ) {
        let physics = physics();
        let mut ball = Ball::new(Vec2::new(x, y));
        ball.vel = Vec2::new(vx, vy);
        physics.update_ball(&mut ball);
        prop_assert!(ball.pos.y + ball.radius <= physics.ground_y() + 1e-3);
    }

    /// A ball dropped onto the crossbar from above bounces off it and is
    /// never counted as a goal
    #[test]
    fn prop_crossbar_keeps_ball_out(
        x in 20.0f32..95.0,
        vx in -5.0f32..0.0,
        vy in 0.0f32..3.0,
    ) {
        let physics = physics();
        let goal_y = physics.config.goal_y();
        let mut ball = Ball::new(Vec2::new(x, goal_y - 15.0 - 0.5));
        ball.vel = Vec2::new(vx, vy);

        physics.update_ball(&mut ball);

        prop_assert!(ball.vel.y < 0.0);
        prop_assert_eq!(ball.pos.y, goal_y - ball.radius);
        prop_assert_eq!(physics.check_goal(&ball), None);

        // Mirror image on the right bar
        let mut ball = Ball::new(Vec2::new(1000.0 - x, goal_y - 15.0 - 0.5));
        ball.vel = Vec2::new(-vx, vy);
        physics.update_ball(&mut ball);
        prop_assert!(ball.vel.y < 0.0);
        prop_assert_eq!(physics.check_goal(&ball), None);
    }

    /// After any contact the ball rests exactly one radius from the body
    #[test]
    fn prop_push_out_leaves_ball_touching(
        px in 200.0f32..800.0,
        py in 200.0f32..350.0,
        size in 30.0f32..50.0,
        dx in -40.0f32..40.0,
        dy in -70.0f32..15.0,
        vx in -6.0f32..6.0,
        vy in -10.0f32..10.0,
        grounded in any::<bool>(),
    ) {
        let physics = physics();
        let mut player = Player::with_size(Vec2::new(px, py), size, size);
        player.vel = Vec2::new(vx, vy);
        player.grounded = grounded;
        let mut ball = Ball::new(Vec2::new(px + dx, py + dy));

        if physics.check_ball_player_collision(&mut ball, &player, &stats()) {
            let distance = distance_to_box(ball.pos, &Aabb::of_player(&player));
            prop_assert!((distance - ball.radius).abs() < 1e-2, "distance {}", distance);
            prop_assert!(ball.speed() <= physics.config.max_ball_speed + 1e-3);
        }
    }

    /// A bug hopping just above the turf never pushes the ball into it
    #[test]
    fn prop_contact_never_buries_ball(
        px in 200.0f32..800.0,
        lift in 0.0f32..30.0,
        dx in -25.0f32..25.0,
        dy in -5.0f32..15.0,
        vy in -10.0f32..10.0,
    ) {
        let physics = physics();
        let ground = physics.ground_y();
        let mut player = Player::with_size(Vec2::new(px, ground - lift), 40.0, 40.0);
        player.vel = Vec2::new(0.0, vy);
        player.grounded = false;
        let mut ball = Ball::new(Vec2::new(px + dx, ground - lift + dy));

        if physics.check_ball_player_collision(&mut ball, &player, &stats()) {
            prop_assert!(ball.pos.y + ball.radius <= ground + 1e-3, "y {}", ball.pos.y);
        }
    }
}

#[test]
fn test_goal_depth_boundary() {
    let physics = physics();
    let config = physics.config;
    let y = config.goal_y() + 40.0;

    let ball_at = |x: f32| Ball::new(Vec2::new(x, y));
    assert_eq!(physics.check_goal(&ball_at(config.goal_depth - 1.0)), Some(Side::Left));
    assert_eq!(physics.check_goal(&ball_at(config.goal_depth + 1.0)), None);
    assert_eq!(
        physics.check_goal(&ball_at(config.width - config.goal_depth + 1.0)),
        Some(Side::Right)
    );
    assert_eq!(physics.check_goal(&ball_at(config.width - config.goal_depth - 1.0)), None);
}

#[test]
fn test_ball_under_airborne_bug_stays_on_turf() {
    let physics = physics();
    let ground = physics.ground_y();
    let mut player = Player::with_size(Vec2::new(500.0, ground - 10.0), 40.0, 40.0);
    player.grounded = false;
    let mut ball = Ball::new(Vec2::new(500.0, ground - 5.0));

    // Push-out alone would leave the centre at ground + 5
    assert!(physics.check_ball_player_collision(&mut ball, &player, &stats()));
    assert_eq!(ball.pos.y, ground - ball.radius);
}

#[test]
fn test_running_bug_chips_a_resting_ball() {
    let physics = physics();
    let ground = physics.ground_y();
    let mut player = Player::new(Vec2::new(468.0, ground), &stats());
    player.vel = Vec2::new(4.0, 0.0);
    player.grounded = true;
    let mut ball = Ball::new(Vec2::new(500.0, ground - 15.0));

    assert!(physics.check_ball_player_collision(&mut ball, &player, &stats()));
    assert!(ball.vel.x > 0.0);
    assert!(ball.vel.y < 0.0);
}

#[test]
fn test_ball_settles_after_long_roll() {
    let physics = physics();
    let mut ball = Ball::new(Vec2::new(300.0, 200.0));
    ball.vel = Vec2::new(25.0, -5.0);
    for _ in 0..1200 {
        physics.update_ball(&mut ball);
    }
    assert!(ball.speed() < 0.1);
    assert!(ball.pos.x >= ball.radius && ball.pos.x <= 1000.0 - ball.radius);
}
