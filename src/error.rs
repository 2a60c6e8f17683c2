use thiserror::Error;

/// The exhaustive set of ways a public operation in this crate can fail.
///
/// Numeric edge cases (degenerate bone directions, parallel vectors) are not
/// represented here — they are recovered locally with deterministic
/// fallbacks rather than surfaced, per the retargeter's translation
/// correction and the math kernel's `quat_between`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetargetError {
    /// `retarget` was called with a source animation and source pose whose
    /// bone counts disagree.
    #[error("source animation has {source_bones} bones but source pose has {pose_bones}")]
    SizeMismatch {
        source_bones: usize,
        pose_bones: usize,
    },

    /// A track's `set_values` (or an install operation built on it) was
    /// given a value sequence whose length doesn't match the keyframe count.
    #[error("expected {expected} track values but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A pose violated one of its structural invariants: unique names,
    /// strictly-topological parent indices, or finite, well-formed
    /// transforms.
    #[error("invalid pose: {reason}")]
    InvalidPose { reason: String },

    /// `Track::evaluate` was called without a default on a track with no
    /// keyframes.
    #[error("cannot evaluate an empty animation track")]
    EmptyTrack,
}
