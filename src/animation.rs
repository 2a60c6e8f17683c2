//! Per-bone animated tracks, index-aligned with a [`Pose`](crate::pose::Pose).

use glam::{Quat, Vec3};

use crate::track::Track;

/// The three independent keyframed channels for one bone.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedBone {
    pub scales: Track<Vec3>,
    pub rotations: Track<Quat>,
    pub translations: Track<Vec3>,
}

impl AnimatedBone {
    /// A bone with no keyframes on any channel; animates statically at
    /// whatever bind value it's evaluated against.
    pub fn empty() -> Self {
        Self {
            scales: Track::empty(),
            rotations: Track::empty(),
            translations: Track::empty(),
        }
    }
}

/// An ordered sequence of animated bones, index-aligned with the pose it was
/// authored against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    pub bones: Vec<AnimatedBone>,
}
