//! Holds a bone hierarchy and per-bone tracks; on each tick computes
//! per-bone global and skinning transforms.

use glam::{Mat4, Quat, Vec3};

use crate::animation::{AnimatedBone, Animation};
use crate::error::RetargetError;
use crate::math;
use crate::pose::{Pose, PoseBone};
use crate::track::Track;

#[derive(Debug, Clone)]
struct SkeletonBone {
    name: String,
    parent_index: Option<usize>,

    local_bind_scale: Vec3,
    local_bind_rotation: Quat,
    local_bind_translation: Vec3,

    inverse_bind: Mat4,
    global: Mat4,
    skinning: Mat4,

    scale_track: Track<Vec3>,
    rotation_track: Track<Quat>,
    translation_track: Track<Vec3>,
}

/// A long-lived, tickable instance of a bone hierarchy with animation
/// tracks installed on it.
///
/// Bones are owned exclusively by the skeleton and reference their parent by
/// index only, never by pointer — this is what makes the data
/// serialization-safe (spec.md §9) and keeps evaluation a single forward
/// pass over a flat array.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bones: Vec<SkeletonBone>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a bind pose: sets each bone's local bind transform, then
    /// recomputes every bone's global bind transform in topological order
    /// and caches each inverse-bind. Any tracks the skeleton previously held
    /// are discarded, since they're only meaningful against the bone set
    /// they were installed for.
    ///
    /// Fails with [`RetargetError::InvalidPose`] if `pose` violates its
    /// structural invariants (spec.md §3).
    pub fn install_bind_pose(&mut self, pose: &Pose) -> Result<(), RetargetError> {
        pose.validate()?;

        let mut bones: Vec<SkeletonBone> = pose
            .bones
            .iter()
            .map(|bone| SkeletonBone {
                name: bone.name.clone(),
                parent_index: bone.parent_index,
                local_bind_scale: bone.scale,
                local_bind_rotation: bone.rotation,
                local_bind_translation: bone.translation,
                inverse_bind: Mat4::IDENTITY,
                global: Mat4::IDENTITY,
                skinning: Mat4::IDENTITY,
                scale_track: Track::empty(),
                rotation_track: Track::empty(),
                translation_track: Track::empty(),
            })
            .collect();

        // Parents always precede children (enforced by `validate`), so a
        // single forward pass suffices.
        for i in 0..bones.len() {
            let local = math::compose_affine(
                bones[i].local_bind_scale,
                bones[i].local_bind_rotation,
                bones[i].local_bind_translation,
            );
            bones[i].global = match bones[i].parent_index {
                Some(parent) => bones[parent].global * local,
                None => local,
            };
        }
        for bone in &mut bones {
            bone.inverse_bind = bone.global.inverse();
        }

        self.bones = bones;
        Ok(())
    }

    /// Installs an animation's tracks onto the current bones, index for
    /// index. Fails with [`RetargetError::LengthMismatch`] if the
    /// animation's bone count doesn't match the skeleton's.
    pub fn install_tracks(&mut self, animation: &Animation) -> Result<(), RetargetError> {
        if animation.bones.len() != self.bones.len() {
            return Err(RetargetError::LengthMismatch {
                expected: self.bones.len(),
                actual: animation.bones.len(),
            });
        }

        for (bone, animated) in self.bones.iter_mut().zip(&animation.bones) {
            bone.scale_track = animated.scales.clone();
            bone.rotation_track = animated.rotations.clone();
            bone.translation_track = animated.translations.clone();
        }
        Ok(())
    }

    /// The current bind pose, as installed by [`Skeleton::install_bind_pose`].
    pub fn extract_pose(&self) -> Pose {
        Pose {
            bones: self
                .bones
                .iter()
                .map(|bone| PoseBone {
                    name: bone.name.clone(),
                    parent_index: bone.parent_index,
                    scale: bone.local_bind_scale,
                    rotation: bone.local_bind_rotation,
                    translation: bone.local_bind_translation,
                })
                .collect(),
        }
    }

    /// The currently installed animation tracks.
    pub fn extract_animation(&self) -> Animation {
        Animation {
            bones: self
                .bones
                .iter()
                .map(|bone| AnimatedBone {
                    scales: bone.scale_track.clone(),
                    rotations: bone.rotation_track.clone(),
                    translations: bone.translation_track.clone(),
                })
                .collect(),
        }
    }

    /// Recomputes every bone's local, global, and skinning transform at
    /// `time`. Bones with empty tracks on a channel hold their bind value
    /// for that channel. Does not loop: times past the longest track's
    /// duration simply clamp to the last keyframe (spec.md §4.2); wrapping
    /// is the caller's responsibility.
    pub fn tick(&mut self, time: f32) {
        for i in 0..self.bones.len() {
            let scale = self.bones[i]
                .scale_track
                .evaluate_or(time, self.bones[i].local_bind_scale);
            let rotation = self.bones[i]
                .rotation_track
                .evaluate_or(time, self.bones[i].local_bind_rotation);
            let translation = self.bones[i]
                .translation_track
                .evaluate_or(time, self.bones[i].local_bind_translation);

            let local = math::compose_affine(scale, rotation, translation);
            let global = match self.bones[i].parent_index {
                Some(parent) => self.bones[parent].global * local,
                None => local,
            };

            self.bones[i].global = global;
            self.bones[i].skinning = global * self.bones[i].inverse_bind;
        }
    }

    /// The per-bone skinning matrices (`global × inverse-bind`) computed by
    /// the most recent [`Skeleton::tick`], indexed by bone id.
    pub fn skinning_matrices(&self) -> Vec<Mat4> {
        self.bones.iter().map(|bone| bone.skinning).collect()
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::Keyframe;
    use approx::assert_relative_eq;

    fn bone(name: &str, parent_index: Option<usize>, translation: Vec3) -> PoseBone {
        PoseBone {
            name: name.to_string(),
            parent_index,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
            translation,
        }
    }

    #[test]
    fn install_bind_pose_rejects_invalid_pose() {
        let pose = Pose {
            bones: vec![bone("a", None, Vec3::ZERO), bone("a", None, Vec3::ZERO)],
        };
        let mut skeleton = Skeleton::new();
        assert!(matches!(
            skeleton.install_bind_pose(&pose),
            Err(RetargetError::InvalidPose { .. })
        ));
    }

    #[test]
    fn tick_with_no_tracks_matches_bind_global() {
        let pose = Pose {
            bones: vec![
                bone("root", None, Vec3::new(0.0, 1.0, 0.0)),
                bone("child", Some(0), Vec3::new(0.0, 1.0, 0.0)),
            ],
        };
        let mut skeleton = Skeleton::new();
        skeleton.install_bind_pose(&pose).unwrap();
        skeleton
            .install_tracks(&Animation {
                bones: vec![AnimatedBone::empty(), AnimatedBone::empty()],
            })
            .unwrap();

        skeleton.tick(12.5);
        let skinning = skeleton.skinning_matrices();

        // Bind global for "child" is translation (0, 2, 0); skinning should
        // be identity since global == bind global here.
        assert_relative_eq!(skinning[1], Mat4::IDENTITY, epsilon = 1e-5);
    }

    #[test]
    fn tick_applies_translation_track() {
        let pose = Pose {
            bones: vec![bone("root", None, Vec3::new(0.0, 1.0, 0.0))],
        };
        let mut skeleton = Skeleton::new();
        skeleton.install_bind_pose(&pose).unwrap();

        let mut animated = AnimatedBone::empty();
        animated.translations = Track::new(vec![Keyframe {
            time: 0.0,
            value: Vec3::new(0.0, 2.0, 0.0),
        }]);
        skeleton
            .install_tracks(&Animation {
                bones: vec![animated],
            })
            .unwrap();

        skeleton.tick(0.0);
        let skinning = skeleton.skinning_matrices();
        let (_, _, translation) = skinning[0].to_scale_rotation_translation();
        assert_relative_eq!(translation, Vec3::new(0.0, 2.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn install_tracks_length_mismatch() {
        let pose = Pose {
            bones: vec![bone("root", None, Vec3::ZERO)],
        };
        let mut skeleton = Skeleton::new();
        skeleton.install_bind_pose(&pose).unwrap();

        let result = skeleton.install_tracks(&Animation {
            bones: vec![AnimatedBone::empty(), AnimatedBone::empty()],
        });
        assert_eq!(
            result,
            Err(RetargetError::LengthMismatch {
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn extract_pose_round_trips_bind_values() {
        let pose = Pose {
            bones: vec![
                bone("root", None, Vec3::new(1.0, 2.0, 3.0)),
                bone("child", Some(0), Vec3::new(0.0, 1.0, 0.0)),
            ],
        };
        let mut skeleton = Skeleton::new();
        skeleton.install_bind_pose(&pose).unwrap();
        assert_eq!(skeleton.extract_pose(), pose);
    }
}
