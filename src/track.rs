//! A keyframed, time-indexed animation channel, generic over the value kind
//! it carries.

use glam::{Quat, Vec3};

use crate::error::RetargetError;
use crate::math;

/// A single `(time, value)` sample. Times within a track are strictly
/// increasing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<V> {
    pub time: f32,
    pub value: V,
}

/// A value kind a [`Track`] can carry, together with how two values of that
/// kind interpolate.
///
/// This is the generalization the design notes in spec.md §9 call for of the
/// original C++ source's `template<typename T> class AnimationTrack`: rather
/// than a template instantiated per value kind (or a tagged union dispatched
/// at the call site), one generic type plus a small trait covers both
/// `Vec3` and `Quat` tracks with the same code.
pub trait TrackValue: Copy + PartialEq {
    fn interpolate(a: Self, b: Self, u: f32) -> Self;
}

impl TrackValue for Vec3 {
    fn interpolate(a: Self, b: Self, u: f32) -> Self {
        math::lerp(a, b, u)
    }
}

impl TrackValue for Quat {
    fn interpolate(a: Self, b: Self, u: f32) -> Self {
        math::slerp(a, b, u)
    }
}

/// A keyframed channel for one bone and one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<V> {
    keyframes: Vec<Keyframe<V>>,
}

impl<V: TrackValue> Track<V> {
    /// Builds a track from a keyframe list. The caller is responsible for
    /// ensuring times are strictly increasing (or the list is empty) — this
    /// is an importer-side contract (spec.md §6), not validated here.
    pub fn new(keyframes: Vec<Keyframe<V>>) -> Self {
        Self { keyframes }
    }

    /// A track with no keyframes; static for its channel.
    pub fn empty() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// The last keyframe's time, or zero if the track is empty.
    pub fn duration(&self) -> f32 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    pub fn keyframes(&self) -> &[Keyframe<V>] {
        &self.keyframes
    }

    /// Evaluates the track at `time`. Fails with [`RetargetError::EmptyTrack`]
    /// if there are no keyframes.
    pub fn evaluate(&self, time: f32) -> Result<V, RetargetError> {
        if self.keyframes.is_empty() {
            return Err(RetargetError::EmptyTrack);
        }
        Ok(self.sample(time))
    }

    /// Evaluates the track at `time`, or returns `default` if empty.
    pub fn evaluate_or(&self, time: f32, default: V) -> V {
        if self.keyframes.is_empty() {
            default
        } else {
            self.sample(time)
        }
    }

    fn sample(&self, time: f32) -> V {
        // First keyframe whose time >= the query time.
        let end = self.keyframes.partition_point(|k| k.time < time);

        if end == 0 {
            return self.keyframes[0].value;
        }
        if end == self.keyframes.len() {
            return self.keyframes[self.keyframes.len() - 1].value;
        }

        let start_key = &self.keyframes[end - 1];
        let end_key = &self.keyframes[end];
        let u = ((time - start_key.time) / (end_key.time - start_key.time)).clamp(0.0, 1.0);

        V::interpolate(start_key.value, end_key.value, u)
    }

    /// The ordered sequence of keyframe values, discarding times.
    pub fn values(&self) -> Vec<V> {
        self.keyframes.iter().map(|k| k.value).collect()
    }

    /// Replaces each keyframe's value in index order, leaving times
    /// untouched. Fails with [`RetargetError::LengthMismatch`] if `values`
    /// doesn't have exactly one entry per keyframe.
    pub fn set_values(&mut self, values: &[V]) -> Result<(), RetargetError> {
        if values.len() != self.keyframes.len() {
            return Err(RetargetError::LengthMismatch {
                expected: self.keyframes.len(),
                actual: values.len(),
            });
        }
        for (keyframe, value) in self.keyframes.iter_mut().zip(values) {
            keyframe.value = *value;
        }
        Ok(())
    }
}
