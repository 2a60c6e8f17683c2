//! The bind-pose data model: a bone hierarchy with per-bone local transforms.

use std::collections::HashSet;

use glam::{Quat, Vec3};

use crate::error::RetargetError;

/// One bone's bind-pose local transform and its place in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseBone {
    pub name: String,
    /// The parent's index in the owning [`Pose`]'s bone list, or `None` for
    /// a root. Always strictly less than this bone's own index.
    pub parent_index: Option<usize>,
    pub scale: Vec3,
    pub rotation: Quat,
    pub translation: Vec3,
}

/// An ordered bone hierarchy, root(s) first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pose {
    pub bones: Vec<PoseBone>,
}

impl Pose {
    /// Checks the three structural invariants of spec.md §3: strictly
    /// topological parent indices, unique bone names, and finite,
    /// well-formed transforms.
    pub fn validate(&self) -> Result<(), RetargetError> {
        let mut seen_names = HashSet::with_capacity(self.bones.len());

        for (index, bone) in self.bones.iter().enumerate() {
            if bone.name.is_empty() {
                return Err(RetargetError::InvalidPose {
                    reason: format!("bone {index} has an empty name"),
                });
            }
            if !seen_names.insert(bone.name.as_str()) {
                return Err(RetargetError::InvalidPose {
                    reason: format!("duplicate bone name {:?}", bone.name),
                });
            }
            if let Some(parent) = bone.parent_index {
                if parent >= index {
                    return Err(RetargetError::InvalidPose {
                        reason: format!(
                            "bone {index} ({:?}) has non-topological parent index {parent}",
                            bone.name
                        ),
                    });
                }
            }
            if !bone.scale.is_finite() || !bone.translation.is_finite() || !bone.rotation.is_finite()
            {
                return Err(RetargetError::InvalidPose {
                    reason: format!("bone {index} ({:?}) has a non-finite transform", bone.name),
                });
            }
        }

        Ok(())
    }

    /// The index of the bone named `name`, if any. Matching is exact and
    /// case-sensitive (trimming and normalization are the importer's job).
    pub fn find_by_name(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|bone| bone.name == name)
    }
}
