//! Skeletal-animation retargeting: given a source skeleton's bind pose, its
//! animation tracks, and a target skeleton's bind pose, produce animation
//! tracks that drive the target skeleton while preserving the motion intent
//! of the source.
//!
//! This crate is a pure, renderer- and importer-agnostic data pipeline. It
//! consumes and produces [`Pose`]s and [`Animation`]s; nothing here touches a
//! GPU, a file format, or a windowing system. A host application is expected
//! to supply poses and animations (typically parsed from an interchange
//! format) and to consume the [`Skeleton::skinning_matrices`] this crate
//! computes each tick.
//!
//! The typical flow:
//!
//! 1. An external importer produces a source [`Pose`] and source
//!    [`Animation`], and a target [`Pose`].
//! 2. [`retarget`] transfers the motion onto the target, producing a target
//!    [`Animation`] and a normalized target bind pose.
//! 3. Both are installed into a [`Skeleton`], which is ticked once per frame
//!    to produce skinning matrices for a renderer.

mod animation;
mod error;
mod math;
mod pose;
mod retarget;
mod skeleton;
mod track;

pub use animation::{AnimatedBone, Animation};
pub use error::RetargetError;
pub use pose::{Pose, PoseBone};
pub use retarget::{bake_rotations, retarget};
pub use skeleton::Skeleton;
pub use track::{Keyframe, Track, TrackValue};

pub use glam::{Mat4, Quat, Vec3};
