//! Orientation animation as an explicit two-state machine.
//!
//! While animating, every frame blends a fixed fraction of the remaining
//! rotation (an exponential ease-out). The animation stops once a probe
//! vector rotated by the current and target orientations agrees to within
//! the convergence threshold.

use glam::Quat;
use serde::{Deserialize, Serialize};

use crate::math::{orientation_agreement, slerp};
use crate::types::Alignment;

/// Animator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnimationState {
    /// Accepted targets are applied directly
    #[default]
    Idle,
    /// Blending toward the target every frame
    Animating,
}

/// Drives smooth orientation changes of the indicator
#[derive(Debug, Clone)]
pub struct OrientationAnimator {
    state: AnimationState,
    blend: f32,
    convergence_dot: f32,
}

impl OrientationAnimator {
    pub fn new(blend: f32, convergence_dot: f32) -> Self {
        Self {
            state: AnimationState::Idle,
            blend,
            convergence_dot,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.state == AnimationState::Animating
    }

    /// Whether `current` is close enough to `target` to stop animating
    pub fn is_converged(&self, current: Quat, target: Quat) -> bool {
        orientation_agreement(current, target) >= self.convergence_dot
    }

    /// Enter the animating state
    pub fn start(&mut self) {
        self.state = AnimationState::Animating;
    }

    /// Return to idle without touching the orientation
    pub fn stop(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// One animation frame: blend toward `target`, then test convergence.
    ///
    /// Returns the new orientation and whether the animation continues.
    pub fn step(&mut self, current: Quat, target: Quat) -> (Quat, bool) {
        let next = slerp(current, target, self.blend);
        let still_animating = !self.is_converged(next, target);
        self.state = if still_animating {
            AnimationState::Animating
        } else {
            AnimationState::Idle
        };
        (next, still_animating)
    }

    /// Apply an accepted alignment update and return the new orientation.
    ///
    /// Animation (re)starts when the alignment changed, or when it is
    /// vertical and the orientation has not converged yet. An animation
    /// already in progress keeps running. Otherwise the target is applied
    /// as-is.
    pub fn drive(
        &mut self,
        current: Quat,
        target: Quat,
        alignment: Alignment,
        alignment_changed: bool,
    ) -> Quat {
        let vertical_unsettled =
            alignment == Alignment::Vertical && !self.is_converged(current, target);
        if alignment_changed || vertical_unsettled {
            self.start();
        }

        if self.is_animating() {
            self.step(current, target).0
        } else {
            target
        }
    }

    /// Update tuning without resetting the state
    pub fn retune(&mut self, blend: f32, convergence_dot: f32) {
        self.blend = blend;
        self.convergence_dot = convergence_dot;
    }
}

impl Default for OrientationAnimator {
    fn default() -> Self {
        Self::new(
            focus_config::DEFAULT_ALIGNMENT_BLEND,
            focus_config::DEFAULT_CONVERGENCE_DOT,
        )
    }
}
