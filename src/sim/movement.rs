//! Movement resolution against the tunnel walls
//!
//! There is no physics engine. A desired displacement is split into a
//! component along the centerline and a component across it, and each is
//! applied on its own behind a wall check. Splitting keeps a diagonal move
//! from cutting through the wall on a curve, and lets the player keep walking
//! forward while pressed against a wall.
//!
//! The wall check runs in double precision on the exact f32 position that
//! would be committed, so the lateral bound holds for the stored state.

use std::f32::consts::TAU;

use glam::{DVec3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::path::{DoublePrecision, PathPrecision, SinglePrecision, collision_lateral};
use crate::consts::*;

/// Wall bounds for the two components of a move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounds {
    /// Bound checked by moves along the centerline
    pub forward: f64,
    /// Bound checked by moves across the centerline (tighter)
    pub lateral: f64,
}

impl Default for WallBounds {
    fn default() -> Self {
        Self {
            forward: WALL_HARD_BOUND,
            lateral: WALL_SOFT_BOUND,
        }
    }
}

/// Which components of a move were kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub forward_accepted: bool,
    pub lateral_accepted: bool,
}

/// A move is legal if it ends inside the bound, or strictly closer to the
/// centerline than it started (so a player outside the soft bound can
/// always step back in).
#[inline]
fn is_legal(candidate_lateral: f64, current_lateral: f64, bound: f64) -> bool {
    candidate_lateral.abs() <= bound || candidate_lateral.abs() < current_lateral.abs()
}

#[inline]
fn clamp_distance(mut position: DVec3, max_distance: f32) -> DVec3 {
    let margin = DISTANCE_MARGIN as f64;
    position.z = position.z.clamp(-margin, max_distance as f64 + margin);
    position
}

/// Try one component of a move, returning the committed position if legal
fn try_component(
    position: Vec3,
    delta: DVec3,
    bound: f64,
    max_distance: f32,
) -> Option<Vec3> {
    if delta == DVec3::ZERO {
        return None;
    }
    let current = collision_lateral(position, max_distance);
    let candidate = clamp_distance(position.as_dvec3() + delta, max_distance).as_vec3();
    let lateral = collision_lateral(candidate, max_distance);
    if is_legal(lateral, current, bound) {
        Some(candidate)
    } else {
        log::debug!(
            "rejected move at z={:.2}: lateral {lateral:.3} exceeds {bound}",
            position.z
        );
        None
    }
}

/// Resolve a desired world-space displacement into a legal new position.
///
/// The displacement is projected onto the path forward and normal directions
/// at the current position. The forward part is applied first, then the
/// lateral part, each discarded if it would leave the tunnel. Forward
/// distance is clamped to `[-DISTANCE_MARGIN, max_distance + DISTANCE_MARGIN]`.
pub fn resolve_movement(
    position: Vec3,
    displacement: Vec3,
    max_distance: f32,
    bounds: WallBounds,
) -> (Vec3, MoveOutcome) {
    let max_d = max_distance as f64;
    let here = position.as_dvec3();
    let forward = DoublePrecision::path_forward(here, max_d);
    let normal = DoublePrecision::path_normal(here, max_d);
    let displacement = displacement.as_dvec3();

    let mut outcome = MoveOutcome::default();
    let mut resolved = position;

    let forward_delta = forward * displacement.dot(forward);
    if let Some(next) = try_component(resolved, forward_delta, bounds.forward, max_distance) {
        resolved = next;
        outcome.forward_accepted = true;
    }

    let lateral_delta = normal * displacement.dot(normal);
    if let Some(next) = try_component(resolved, lateral_delta, bounds.lateral, max_distance) {
        resolved = next;
        outcome.lateral_accepted = true;
    }

    resolved.z = resolved.z.clamp(-DISTANCE_MARGIN, max_distance + DISTANCE_MARGIN);
    (resolved, outcome)
}

/// World-space displacement for this frame from the resolved move axes.
///
/// `axis.x` strafes right, `axis.y` walks forward, relative to `yaw_degrees`.
/// Diagonal input is normalized so it is no faster than straight input.
pub fn desired_displacement(axis: Vec2, yaw_degrees: f32, running: bool, dt: f32) -> Vec3 {
    let axis = if axis.length_squared() > 1.0 {
        axis.normalize()
    } else {
        axis
    };
    let r = yaw_degrees.to_radians();
    let facing = Vec3::new(r.sin(), 0.0, r.cos());
    let right = Vec3::new(r.cos(), 0.0, -r.sin());
    let speed = if running { RUN_SPEED } else { WALK_SPEED };
    (facing * axis.y + right * axis.x) * speed * dt
}

/// What is underfoot at a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FootSurface {
    Gravel,
    /// Wooden sleeper between the rails
    Sleeper,
    Rail,
}

/// Half of standard gauge
pub const RAIL_OFFSET: f32 = 0.7175;
pub const RAIL_HALF_WIDTH: f32 = 0.08;
pub const SLEEPER_SPACING: f32 = 0.6;
pub const SLEEPER_LENGTH: f32 = 0.25;

/// Classify the surface under a world position. Uses the shader-precision
/// path so it agrees with what is drawn.
pub fn foot_surface(position: Vec3, max_distance: f32) -> FootSurface {
    let local = SinglePrecision::to_path_space(position, max_distance);
    let lateral = local.x.abs();
    if (lateral - RAIL_OFFSET).abs() <= RAIL_HALF_WIDTH {
        FootSurface::Rail
    } else if lateral < RAIL_OFFSET + 0.5 && local.z.rem_euclid(SLEEPER_SPACING) < SLEEPER_LENGTH {
        FootSurface::Sleeper
    } else {
        FootSurface::Gravel
    }
}

/// Advance head bob. Returns true when a foot lands: when the bob goes from
/// above level to level or below, and on the first tick of walking.
pub fn integrate_bob(
    walk_time: &mut f32,
    bob_offset: &mut f32,
    was_walking: bool,
    walking: bool,
    running: bool,
    bob_intensity: f32,
    dt: f32,
) -> bool {
    if !walking {
        // Settle back to level while standing still
        *bob_offset = crate::lerp(*bob_offset, 0.0, (dt * 10.0).min(1.0));
        return false;
    }

    let phase_before = *walk_time * TAU * STEP_CADENCE;
    let rate = if running { RUN_CADENCE_SCALE } else { 1.0 };
    *walk_time += dt * rate;
    let phase_after = *walk_time * TAU * STEP_CADENCE;

    *bob_offset = phase_after.sin() * BOB_AMPLITUDE * bob_intensity;

    let landed = phase_before.sin() > 0.0 && phase_after.sin() <= 0.0;
    landed || !was_walking
}
