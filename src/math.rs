//! Scalar/vector/quaternion/matrix primitives shared by the track, skeleton
//! and retargeter modules. Everything here is a pure function over `glam`
//! types; nothing in this module owns state or can fail.

use glam::{Mat4, Quat, Vec3};

/// Below this dot product, two normalized vectors are considered parallel.
const PARALLEL_EPS: f32 = 1e-6;

/// The unit quaternion rotating `a` onto `b`.
///
/// Both inputs are normalized internally; they need not already be unit
/// length, only non-zero. If either is (numerically) zero-length, the
/// identity rotation is returned rather than panicking — callers that need
/// to distinguish that case should check vector lengths themselves.
///
/// If `a` and `b` already point the same way, returns the identity. If they
/// point in exactly opposite directions the rotation axis is ambiguous
/// (infinitely many 180-degree rotations take one onto the other); this
/// picks the world axis least aligned with `a`, projected orthogonal to it,
/// which is stable under ties and deterministic across calls.
pub fn quat_between(a: Vec3, b: Vec3) -> Quat {
    let (Some(a), Some(b)) = (a.try_normalize(), b.try_normalize()) else {
        return Quat::IDENTITY;
    };

    let dot = a.dot(b).clamp(-1.0, 1.0);

    if dot >= 1.0 - PARALLEL_EPS {
        return Quat::IDENTITY;
    }

    if dot <= -1.0 + PARALLEL_EPS {
        let axis = most_orthogonal_axis(a);
        let ortho = (axis - a * a.dot(axis))
            .try_normalize()
            .unwrap_or(Vec3::Y);
        return Quat::from_axis_angle(ortho, std::f32::consts::PI);
    }

    let axis = a.cross(b).normalize();
    Quat::from_axis_angle(axis, dot.acos())
}

/// The world axis (X, Y, or Z) whose direction is least aligned with `v`.
fn most_orthogonal_axis(v: Vec3) -> Vec3 {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax <= ay && ax <= az {
        Vec3::X
    } else if ay <= az {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

/// Shortest-arc spherical linear interpolation between two unit quaternions.
///
/// `t` is clamped to `[0, 1]`. If `q0` and `q1` are more than a quarter turn
/// apart by dot product, one is negated first so the interpolation takes the
/// shorter of the two great-circle arcs between them (a quaternion and its
/// negation represent the same rotation, so this never changes the endpoints
/// semantically).
pub fn slerp(q0: Quat, q1: Quat, t: f32) -> Quat {
    let t = t.clamp(0.0, 1.0);

    // `Quat::slerp` already negates `q1` when the dot product is negative so
    // the interpolation takes the shorter great-circle arc, and falls back
    // to a normalized lerp when the two are nearly parallel to avoid
    // dividing by a near-zero `sin(theta)`.
    q0.slerp(q1, t)
}

/// Componentwise linear interpolation between two vectors.
pub fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, t)
}

/// Rotates `v` by `q`.
pub fn rotate_by_quat(q: Quat, v: Vec3) -> Vec3 {
    q * v
}

/// Builds the affine matrix `T * R * S`: scale first, then rotate, then
/// translate.
pub fn compose_affine(scale: Vec3, rotation: Quat, translation: Vec3) -> Mat4 {
    Mat4::from_scale_rotation_translation(scale, rotation, translation)
}

/// Extracts `(scale, rotation, translation)` from an affine matrix such that
/// `compose_affine(scale, rotation, translation) ≈ m`.
///
/// Only well-defined for matrices with no shear or projective component,
/// which holds for any matrix built from bind-pose locals by
/// `compose_affine`.
pub fn decompose_affine(m: Mat4) -> (Vec3, Quat, Vec3) {
    m.to_scale_rotation_translation()
}
