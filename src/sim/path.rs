//! Tunnel centerline geometry
//!
//! The tunnel follows a single closed-form curve: the centerline's lateral
//! (x) offset is a function of forward distance (z). The shader evaluates the
//! same curve in single precision, so the geometry is written once and
//! instantiated twice:
//!
//! - [`SinglePrecision`] mirrors the shader and feeds anything rendered.
//! - [`DoublePrecision`] is authoritative for wall collision.
//!
//! The two disagree by a small bounded amount (the f32 forward difference is
//! noisy at large distances). That is expected and must not be "fixed" by
//! unifying them; the movement resolver's two wall bounds absorb it.

use glam::{DVec3, Vec3};

/// Step used for the forward-difference tangent
pub const TANGENT_EPSILON: f64 = 0.001;

/// Path geometry evaluated at a fixed numeric precision.
///
/// Positions use `x` = lateral, `y` = vertical, `z` = forward distance.
/// Path-space positions use the same layout, with `x` measured
/// perpendicular to the centerline instead of along the world x axis.
pub trait PathPrecision {
    type Scalar: Copy;
    type Vector: Copy;

    /// Lateral offset of the centerline at `distance`
    fn lateral_offset(distance: Self::Scalar, max_distance: Self::Scalar) -> Self::Scalar;

    /// Unit tangent of the centerline at `position.z`
    fn path_forward(position: Self::Vector, max_distance: Self::Scalar) -> Self::Vector;

    /// Unit horizontal normal of the centerline at `position.z`, pointing to +x
    /// where the tunnel is straight
    fn path_normal(position: Self::Vector, max_distance: Self::Scalar) -> Self::Vector;

    /// World space to path-relative space
    fn to_path_space(position: Self::Vector, max_distance: Self::Scalar) -> Self::Vector;

    /// Path-relative space to world space
    fn from_path_space(position: Self::Vector, max_distance: Self::Scalar) -> Self::Vector;
}

/// f32 geometry, matching the tunnel shader
#[derive(Debug, Clone, Copy)]
pub struct SinglePrecision;

/// f64 geometry, used for collision
#[derive(Debug, Clone, Copy)]
pub struct DoublePrecision;

macro_rules! path_geometry {
    ($precision:ty, $float:ty, $vector:ty) => {
        impl PathPrecision for $precision {
            type Scalar = $float;
            type Vector = $vector;

            // 6.2831853 rather than TAU: the shader uses this literal
            #[allow(clippy::approx_constant)]
            fn lateral_offset(distance: $float, max_distance: $float) -> $float {
                let x = distance / max_distance;
                -(x * 6.2831853 - 1.2).sin() * smoothstep(x * 2.0 - 0.3) * 0.07 * max_distance
            }

            fn path_forward(position: $vector, max_distance: $float) -> $vector {
                let eps = TANGENT_EPSILON as $float;
                let slope = Self::lateral_offset(position.z + eps, max_distance)
                    - Self::lateral_offset(position.z, max_distance);
                <$vector>::new(slope, 0.0, eps).normalize()
            }

            fn path_normal(position: $vector, max_distance: $float) -> $vector {
                let eps = TANGENT_EPSILON as $float;
                let slope = Self::lateral_offset(position.z + eps, max_distance)
                    - Self::lateral_offset(position.z, max_distance);
                <$vector>::new(eps, 0.0, -slope).normalize()
            }

            fn to_path_space(position: $vector, max_distance: $float) -> $vector {
                let normal = Self::path_normal(position, max_distance);
                let dx = position.x - Self::lateral_offset(position.z, max_distance);
                let lateral = dx * normal.x;
                <$vector>::new(lateral, position.y, position.z - lateral * normal.z)
            }

            fn from_path_space(position: $vector, max_distance: $float) -> $vector {
                let normal = Self::path_normal(position, max_distance);
                let center = Self::lateral_offset(position.z, max_distance);
                <$vector>::new(
                    center + position.x * normal.x,
                    position.y,
                    position.z + position.x * normal.z,
                )
            }
        }
    };
}

path_geometry!(SinglePrecision, f32, Vec3);
path_geometry!(DoublePrecision, f64, DVec3);

/// Cubic smoothstep on a clamped input: `t²(3 - 2t)`
#[inline]
pub fn smoothstep<T: Smooth>(t: T) -> T {
    t.smoothstep()
}

pub trait Smooth: Copy {
    fn smoothstep(self) -> Self;
}

impl Smooth for f32 {
    fn smoothstep(self) -> Self {
        let t = self.clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

impl Smooth for f64 {
    fn smoothstep(self) -> Self {
        let t = self.clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Perpendicular distance of a world position from the centerline,
/// evaluated in double precision for the collision check
#[inline]
pub fn collision_lateral(position: Vec3, max_distance: f32) -> f64 {
    DoublePrecision::to_path_space(position.as_dvec3(), max_distance as f64).x
}
