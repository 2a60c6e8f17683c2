//! Name-matched transfer of animated-bone data from a source skeleton to a
//! target skeleton, correcting translation tracks for differing bone
//! lengths and orientations.

use glam::{Quat, Vec3};

use crate::animation::{AnimatedBone, Animation};
use crate::error::RetargetError;
use crate::math;
use crate::pose::Pose;

/// Below this squared length, a bone's local translation is treated as
/// degenerate and the translation correction for it passes through
/// unchanged (spec.md §4.4.3).
const DEGENERATE_LENGTH_SQ: f32 = 1e-16; // (1e-8)^2

/// Rewrites `pose` so that every bone's orientation is carried entirely by
/// translations: for each bone in topological order, the parent's
/// accumulated rotation is folded into the bone's own translation and
/// rotation, and finally every rotation is reset to identity.
///
/// The accumulation is a single forward pass, not two explicit passes over
/// the hierarchy: because bones are visited in topological (parent-before-
/// child) order and each bone's `rotation` field is overwritten in place
/// with "the rotation a child should fold in", a grandchild reads its
/// parent's *already-accumulated* rotation, which already folds in the
/// grandparent. The final loop resetting every rotation to identity is what
/// makes this "baking" rather than just a precomputation (spec.md §4.4.1).
pub fn bake_rotations(pose: &Pose) -> Pose {
    let mut bones = pose.bones.clone();

    for i in 0..bones.len() {
        if let Some(parent) = bones[i].parent_index {
            let parent_rotation = bones[parent].rotation;
            bones[i].translation = math::rotate_by_quat(parent_rotation, bones[i].translation);
            bones[i].rotation = parent_rotation * bones[i].rotation;
        }
    }
    for bone in &mut bones {
        bone.rotation = Quat::IDENTITY;
    }

    Pose { bones }
}

/// The rotation and isotropic scale factor that reorients and rescales a
/// source bone's local translation onto a target bone's. Degenerate
/// (near-zero-length) translations on either side fall back to an identity
/// rotation and unit scale rather than producing a NaN or undefined axis.
fn translation_correction(source_translation: Vec3, target_translation: Vec3) -> (Quat, f32) {
    let source_len_sq = source_translation.length_squared();
    let target_len_sq = target_translation.length_squared();

    if source_len_sq < DEGENERATE_LENGTH_SQ || target_len_sq < DEGENERATE_LENGTH_SQ {
        return (Quat::IDENTITY, 1.0);
    }

    let rotation = math::quat_between(source_translation, target_translation);
    // sqrt(|t_t|^2 / |t_s|^2) rather than |t_t| / |t_s|: saves a square
    // root and must be used as written to reproduce reference behavior
    // (spec.md §4.4.3).
    let scale = (target_len_sq / source_len_sq).sqrt();

    (rotation, scale)
}

/// Transfers `source_animation` from `source_bind_pose` onto
/// `target_bind_pose`, producing target-bone-aligned tracks and the baked
/// target bind pose they were computed against.
///
/// Phases run in strict order with no persistent state: normalize the
/// target bind pose (bake rotations), match bones by exact name, then
/// transform translation tracks for matched pairs. Fails with
/// [`RetargetError::SizeMismatch`] if `source_animation` and
/// `source_bind_pose` disagree on bone count; otherwise always succeeds.
pub fn retarget(
    source_animation: &Animation,
    source_bind_pose: &Pose,
    target_bind_pose: &Pose,
) -> Result<(Animation, Pose), RetargetError> {
    if source_animation.bones.len() != source_bind_pose.bones.len() {
        return Err(RetargetError::SizeMismatch {
            source_bones: source_animation.bones.len(),
            pose_bones: source_bind_pose.bones.len(),
        });
    }

    let baked_target_pose = bake_rotations(target_bind_pose);

    let mut result_animation_bones = Vec::with_capacity(baked_target_pose.bones.len());

    for target_bone in &baked_target_pose.bones {
        let animated_bone = match source_bind_pose.find_by_name(&target_bone.name) {
            None => {
                log::debug!(
                    "no source bone named {:?}; it will animate statically at its bind value",
                    target_bone.name
                );
                AnimatedBone::empty()
            }
            Some(source_index) => {
                let source_bone = &source_bind_pose.bones[source_index];
                let source_animated = &source_animation.bones[source_index];

                let (rotation_offset, scale_factor) =
                    translation_correction(source_bone.translation, target_bone.translation);

                let mut translations = source_animated.translations.clone();
                let corrected: Vec<Vec3> = translations
                    .values()
                    .into_iter()
                    .map(|v| math::rotate_by_quat(rotation_offset, v * scale_factor))
                    .collect();
                translations.set_values(&corrected)?;

                AnimatedBone {
                    scales: source_animated.scales.clone(),
                    rotations: source_animated.rotations.clone(),
                    translations,
                }
            }
        };
        result_animation_bones.push(animated_bone);
    }

    Ok((
        Animation {
            bones: result_animation_bones,
        },
        baked_target_pose,
    ))
}
